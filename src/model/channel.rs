use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct Channel {
    pub id: i32,
    pub name: String,
    pub subsystem: String,
}
