use crate::error::LevelError;
use crate::services::{LevelDatabase, LevelDefinition};

/// Ordered, non-empty list of levels
#[derive(Debug, Clone)]
pub struct LevelTable {
    levels: Vec<LevelDefinition>,
}

impl LevelTable {
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::Empty);
        }
        Ok(Self { levels })
    }

    /// One entry per grid depth: level 0 is the full six-row grid
    pub fn classic() -> Self {
        let names = [
            "Full Grid",
            "First Contact",
            "Second Wave",
            "Closing In",
            "Last Line",
            "Vanguard",
        ];
        Self {
            levels: names.into_iter().map(LevelDefinition::new).collect(),
        }
    }
}

impl LevelDatabase for LevelTable {
    fn count(&self) -> usize {
        self.levels.len()
    }

    fn get(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(LevelTable::new(Vec::new()).unwrap_err(), LevelError::Empty);
    }

    #[test]
    fn test_classic_table_indexes() {
        let table = LevelTable::classic();
        assert_eq!(table.count(), 6);
        assert_eq!(table.get(1).map(|l| l.name.as_str()), Some("First Contact"));
        assert!(table.get(6).is_none());
    }
}
