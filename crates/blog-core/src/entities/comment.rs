//! Comment entity - a reader's reply under a post

use chrono::{DateTime, Utc};

use crate::value_objects::Id;

/// Comment with its set of likers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Id,
    pub post_id: Id,
    pub user_id: Id,
    pub text: String,
    /// Users who liked the comment, without duplicates
    pub likes: Vec<Id>,
    /// Always equal to `likes.len()`
    pub number_of_likes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    Liked,
    Unliked,
}

impl Comment {
    /// Check whether the user currently likes this comment
    pub fn is_liked_by(&self, user_id: Id) -> bool {
        self.likes.contains(&user_id)
    }

    /// Add the user's like, or remove it if already present.
    ///
    /// The counter is recomputed from the set so the two cannot drift.
    pub fn toggle_like(&mut self, user_id: Id) -> LikeToggle {
        let outcome = if let Some(pos) = self.likes.iter().position(|id| *id == user_id) {
            self.likes.remove(pos);
            LikeToggle::Unliked
        } else {
            self.likes.push(user_id);
            LikeToggle::Liked
        };
        self.number_of_likes = self.likes.len() as i32;
        self.updated_at = Utc::now();
        outcome
    }
}

/// Data required to create a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: Id,
    pub user_id: Id,
    pub text: String,
}
