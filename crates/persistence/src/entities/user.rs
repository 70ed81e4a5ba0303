//! Guest entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            full_name: entity.full_name,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::User;

    #[test]
    fn test_user_entity_to_domain() {
        let entity = UserEntity {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            full_name: "Ana Torres".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let user: User = entity.clone().into();

        assert_eq!(user.id, entity.id);
        assert_eq!(user.email, entity.email);
        assert_eq!(user.full_name, entity.full_name);
        assert_eq!(user.created_at, entity.created_at);
    }
}
