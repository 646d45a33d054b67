//! Evaluation settings

/// How an array smaller than the broadcast target is stretched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExpansionMode {
    /// Copy the array's own cells and put the fill value everywhere else
    #[default]
    PadWithFill,
    /// Repeat a single-row array down and a single-column array across
    /// before padding; other arrays are padded as with `PadWithFill`
    ReplicateVectors,
}

/// Options for function evaluation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvaluationSettings {
    /// How arrays smaller than the broadcast target are stretched
    pub expansion: ExpansionMode,
    /// Largest grid (rows × columns) a single call may materialize; larger
    /// broadcasts evaluate to `#SPILL!` (default: 5,000,000)
    pub max_array_cells: usize,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            expansion: ExpansionMode::PadWithFill,
            max_array_cells: 5_000_000,
        }
    }
}

impl EvaluationSettings {
    /// Set the expansion mode
    pub fn with_expansion(mut self, expansion: ExpansionMode) -> Self {
        self.expansion = expansion;
        self
    }

    /// Set the materialized cell limit
    pub fn with_max_array_cells(mut self, max_array_cells: usize) -> Self {
        self.max_array_cells = max_array_cells;
        self
    }
}
