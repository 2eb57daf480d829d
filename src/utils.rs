use crate::data::Field;
use crate::individual::Individual;

/// One-line progress summary for a generation
pub fn display_generation(generation: usize, best: &Individual) -> String {
    format!(
        "Generation {} - best tour distance {:.3} (fitness {:.3})",
        generation,
        best.total_distance(),
        best.fit
    )
}

/// Full multi-line route listing for the final report
pub fn display_route(best: &Individual, field: &Field) -> String {
    best.display(field)
}
