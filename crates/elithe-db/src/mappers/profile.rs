//! Member entity <-> profile model mapper

use elithe_core::entities::Member;

use crate::models::ProfileModel;

/// Convert ProfileModel to Member entity
/// Note: an unknown role string degrades to a regular member
impl From<ProfileModel> for Member {
    fn from(model: ProfileModel) -> Self {
        Member {
            id: model.id,
            name: model.name,
            email: model.email,
            motorcycle: model.motorcycle,
            birth_date: model.birth_date,
            participation_count: model.participation_count,
            reward_tiers: model.reward_tiers,
            role: model.role.parse().unwrap_or_default(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
