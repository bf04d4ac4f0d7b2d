// MindEcho Command Modules — HTTP Layer
//
// Each sub-module is a thin axum handler set.
// Heavy logic lives in mindecho-core; these modules
// only deserialise, delegate, and serialise.

pub mod analyze;
pub mod chat;
pub mod mood;
pub mod utility;
pub mod wellness;
