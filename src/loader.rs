//! Memory image loader
//!
//! Images are plain text, one `address value` pair per line, decimal,
//! whitespace separated. Bad lines are rejected eagerly with their line
//! number. The same parsed image seeds both machines.

use crate::cpu::MachineState;
use crate::cpu::MEM_SIZE;
use crate::error::ImageError;
use crate::error::SimulatorResult;

/// Parsed memory image
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryImage {
    cells: Vec<(u16, i16)>,
}

impl MemoryImage {
    /// Writes every pair into the machine's memory
    pub fn apply(&self, machine: &mut MachineState) {
        for &(address, value) in &self.cells {
            machine.mem[address as usize] = value;
        }
    }

    pub fn cells(&self) -> &[(u16, i16)] {
        &self.cells
    }
}

/// Reads and parses an image file
pub fn load_image(path: &str) -> SimulatorResult<MemoryImage> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_image(&content)?)
}

/// Parses image text
pub fn parse_image(content: &str) -> Result<MemoryImage, ImageError> {
    let mut cells: Vec<(u16, i16)> = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(ImageError::Malformed {
                line: line_num + 1,
                text: line.trim().to_string(),
            });
        }

        let address: i64 = parts[0].parse().map_err(|_| ImageError::Malformed {
            line: line_num + 1,
            text: line.trim().to_string(),
        })?;
        let value: i64 = parts[1].parse().map_err(|_| ImageError::Malformed {
            line: line_num + 1,
            text: line.trim().to_string(),
        })?;

        if !(0..MEM_SIZE as i64).contains(&address) {
            return Err(ImageError::AddressRange { line: line_num + 1, address });
        }
        // Values 32768..=65535 are accepted and wrap to negative
        if !(-32768..=65535).contains(&value) {
            return Err(ImageError::ValueRange { line: line_num + 1, value });
        }

        cells.push((address as u16, value as i16));
    }

    Ok(MemoryImage { cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::SimPolicy;

    #[test]
    fn test_parse_pairs() {
        let image = parse_image("0 61440\n1 57347\n").unwrap();
        assert_eq!(image.cells(), &[(0, 0xF000u16 as i16), (1, 0xE003u16 as i16)]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let image = parse_image("\n0 5\n   \n1 6\n").unwrap();
        assert_eq!(image.cells(), &[(0, 5), (1, 6)]);
    }

    #[test]
    fn test_high_values_wrap_negative() {
        let image = parse_image("0 40000").unwrap();
        assert_eq!(image.cells(), &[(0, -25536)]);
    }

    #[test]
    fn test_negative_values_kept() {
        let image = parse_image("10 -1").unwrap();
        assert_eq!(image.cells(), &[(10, -1)]);
    }

    #[test]
    fn test_malformed_lines_carry_line_number() {
        let err = parse_image("0 1\n1 2\nbad\n").unwrap_err();
        assert_eq!(err, ImageError::Malformed { line: 3, text: "bad".to_string() });

        let err = parse_image("0 1 2").unwrap_err();
        assert_eq!(err, ImageError::Malformed { line: 1, text: "0 1 2".to_string() });

        let err = parse_image("zero 1").unwrap_err();
        assert_eq!(err, ImageError::Malformed { line: 1, text: "zero 1".to_string() });
    }

    #[test]
    fn test_address_range_checked() {
        let err = parse_image("65536 0").unwrap_err();
        assert_eq!(err, ImageError::AddressRange { line: 1, address: 65536 });

        let err = parse_image("-1 0").unwrap_err();
        assert_eq!(err, ImageError::AddressRange { line: 1, address: -1 });
    }

    #[test]
    fn test_value_range_checked() {
        let err = parse_image("0 65536").unwrap_err();
        assert_eq!(err, ImageError::ValueRange { line: 1, value: 65536 });

        let err = parse_image("0 -32769").unwrap_err();
        assert_eq!(err, ImageError::ValueRange { line: 1, value: -32769 });
    }

    #[test]
    fn test_apply_writes_cells() {
        let image = parse_image("0 7\n65535 -2\n").unwrap();
        let mut machine = MachineState::make(SimPolicy::default());
        image.apply(&mut machine);
        assert_eq!(machine.mem[0], 7);
        assert_eq!(machine.mem[65535], -2);
        assert_eq!(machine.mem[1], 0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_image("progs/does-not-exist.txt").unwrap_err();
        assert!(matches!(err, crate::error::SimulatorError::IoError(_)));
    }
}
