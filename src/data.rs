use crate::error::GentourError;
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// The search space: a fixed set of named 2D locations with one designated
/// start. Immutable once loaded. Also acts as the distance oracle for
/// fitness evaluation.
#[derive(Clone, Serialize, Deserialize)]
pub struct Field {
    pub points: Vec<(f64, f64)>, // Location coordinates
    pub names: Vec<String>,      // Location names, same order as points
    pub start: usize,            // Index of the fixed start location
    pub point_len: usize,
}

impl Field {
    /// Create a new `Field` instance with default values
    pub fn new() -> Field {
        Field {
            points: Vec::new(),
            names: Vec::new(),
            start: 0,
            point_len: 0,
        }
    }

    /// Load locations from a coordinates file (one `x y` pair per line,
    /// whitespace separated) and a parallel names file (one name per line).
    /// The two files are joined by position and must have the same length.
    pub fn load_data(&mut self, coordinates_path: &str, names_path: &str) -> Result<(), Box<dyn Error>> {
        info!("Loading files {} and {}...", coordinates_path, names_path);

        let file_coordinates = File::open(coordinates_path)?;
        let reader_coordinates = BufReader::new(file_coordinates);

        for (line_number, line) in reader_coordinates.lines().enumerate() {
            let line = line?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() {
                continue;
            }

            let mut fields = trimmed_line.split_whitespace();
            let x: f64 = match fields.next() {
                Some(value) => value.parse()?,
                None => return Err(format!("{}:{}: missing x coordinate", coordinates_path, line_number + 1).into()),
            };
            let y: f64 = match fields.next() {
                Some(value) => value.parse()?,
                None => return Err(format!("{}:{}: missing y coordinate", coordinates_path, line_number + 1).into()),
            };
            self.points.push((x, y));
        }

        let file_names = File::open(names_path)?;
        let reader_names = BufReader::new(file_names);

        for line in reader_names.lines() {
            let line = line?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() {
                continue;
            }
            self.names.push(trimmed_line.to_string());
        }

        if self.points.len() != self.names.len() {
            return Err(Box::new(GentourError::DatasetMismatch {
                coordinates: self.points.len(),
                names: self.names.len(),
            }));
        }

        self.point_len = self.points.len();

        Ok(())
    }

    /// Designate the start location by name
    pub fn set_start(&mut self, name: &str) -> Result<(), GentourError> {
        match self.names.iter().position(|n| n == name) {
            Some(index) => {
                self.start = index;
                Ok(())
            }
            None => Err(GentourError::UnknownStartLocation(name.to_string())),
        }
    }

    /// Chromosome length for this dataset: every location except the start
    pub fn chromosome_size(&self) -> usize {
        self.point_len.saturating_sub(1)
    }

    /// The index universe a valid chromosome is a permutation of
    pub fn tour_indices(&self) -> Vec<usize> {
        (0..self.point_len).filter(|&i| i != self.start).collect()
    }

    /// Straight-line distance between two locations
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        let (x1, y1) = self.points[a];
        let (x2, y2) = self.points[b];
        ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Field with {} locations, start at #{} ({})",
            self.point_len,
            self.start,
            self.names.get(self.start).map(String::as_str).unwrap_or("unset")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn create_test_field() -> Field {
        Field {
            points: vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)],
            names: vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()],
            start: 0,
            point_len: 4,
        }
    }

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_data() {
        let coordinates = write_temp(
            "gentour_data_ok_coords.txt",
            "0.0 0.0\n0.0 10.0\n10.0 10.0\n10.0 0.0\n",
        );
        let names = write_temp("gentour_data_ok_names.txt", "A\nB\nC\nD\n");

        let mut field = Field::new();
        field
            .load_data(coordinates.to_str().unwrap(), names.to_str().unwrap())
            .unwrap();

        assert_eq!(field.point_len, 4);
        assert_eq!(field.points[2], (10.0, 10.0));
        assert_eq!(field.names[3], "D");
        assert_eq!(field.chromosome_size(), 3);
    }

    #[test]
    fn test_load_data_mismatch() {
        let coordinates = write_temp(
            "gentour_data_mismatch_coords.txt",
            "0.0 0.0\n0.0 10.0\n10.0 10.0\n",
        );
        let names = write_temp("gentour_data_mismatch_names.txt", "A\nB\n");

        let mut field = Field::new();
        let err = field
            .load_data(coordinates.to_str().unwrap(), names.to_str().unwrap())
            .unwrap_err();
        let err = err.downcast::<GentourError>().unwrap();
        assert_eq!(
            *err,
            GentourError::DatasetMismatch {
                coordinates: 3,
                names: 2
            }
        );
    }

    #[test]
    fn test_set_start() {
        let mut field = create_test_field();
        field.set_start("C").unwrap();
        assert_eq!(field.start, 2);
        assert_eq!(field.tour_indices(), vec![0, 1, 3]);
    }

    #[test]
    fn test_set_start_unknown() {
        let mut field = create_test_field();
        let err = field.set_start("Z").unwrap_err();
        assert_eq!(err, GentourError::UnknownStartLocation("Z".to_string()));
    }

    #[test]
    fn test_distance() {
        let field = create_test_field();
        assert_eq!(field.distance(0, 1), 10.0);
        assert_eq!(field.distance(0, 2), 200.0_f64.sqrt());
        assert_eq!(field.distance(3, 3), 0.0);
        // symmetric
        assert_eq!(field.distance(1, 3), field.distance(3, 1));
    }

    #[test]
    fn test_tour_indices_excludes_start() {
        let field = create_test_field();
        let indices = field.tour_indices();
        assert_eq!(indices, vec![1, 2, 3]);
        assert!(!indices.contains(&field.start));
    }
}
