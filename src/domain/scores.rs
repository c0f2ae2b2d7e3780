use serde::{Deserialize, Serialize};

/// One value per assessment dimension, serialized with the portal's field
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionScores<T> {
    #[serde(rename = "estresse")]
    pub stress: T,
    #[serde(rename = "ansiedade")]
    pub anxiety: T,
    pub burnout: T,
    #[serde(rename = "depressao")]
    pub depression: T,
    #[serde(rename = "equilibrio")]
    pub balance: T,
    #[serde(rename = "apoio")]
    pub support: T,
}

impl<T: Copy> DimensionScores<T> {
    pub fn map<U>(self, f: impl Fn(T) -> U) -> DimensionScores<U> {
        DimensionScores {
            stress: f(self.stress),
            anxiety: f(self.anxiety),
            burnout: f(self.burnout),
            depression: f(self.depression),
            balance: f(self.balance),
            support: f(self.support),
        }
    }

    /// Stress, anxiety, burnout and depression, where higher is worse.
    pub fn symptoms(&self) -> [T; 4] {
        [self.stress, self.anxiety, self.burnout, self.depression]
    }
}
