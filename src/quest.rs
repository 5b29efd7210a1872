use serde::{Deserialize, Serialize};

/// One user-defined task. Names are free text and not required to be unique;
/// the serialized shape is the on-disk contract, so `description` and
/// `completed` default when an older document omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub name: String,
    pub difficulty: i64,
    pub exp_reward: i64,
    pub coin_reward: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Quest {
    pub fn new(
        name: String,
        difficulty: i64,
        exp_reward: i64,
        coin_reward: i64,
        description: String,
    ) -> Self {
        Self {
            name,
            difficulty,
            exp_reward,
            coin_reward,
            description,
            completed: false,
        }
    }
}
