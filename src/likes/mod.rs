//! Like Set domain types - per-user references into the catalog.

pub mod registry;

use serde::Serialize;

use crate::db::models::Submodel;

/// A Like Set entry joined against the live catalog: the model name and
/// submodel attributes are read fresh at aggregation time, never cached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedSubmodelDetail {
    pub model_id: String,
    pub model_name: String,
    pub submodel_id: String,
    pub submodel: Submodel,
}

/// Outcome of a like call. Both cases are success; the distinction only
/// changes the message reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Liked,
    AlreadyLiked,
}

impl LikeOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            LikeOutcome::Liked => "Submodel liked successfully",
            LikeOutcome::AlreadyLiked => "Submodel already liked by this user",
        }
    }
}

/// Outcome of an unlike call; removing an absent pair is a no-op success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlikeOutcome {
    Removed,
    WasNotLiked,
}

impl UnlikeOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            UnlikeOutcome::Removed => "Submodel unliked successfully",
            UnlikeOutcome::WasNotLiked => "Submodel was not liked by this user",
        }
    }
}
