use accounts_backend::model::user::{NewUser, UserChanges, UserRole};
use accounts_backend::repository::repository_error::RepositoryError;
use accounts_backend::repository::user_repo::{SqliteUserRepository, UserRepository};
use sqlx::sqlite::SqlitePoolOptions;

async fn test_repo() -> SqliteUserRepository {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    SqliteUserRepository::migrate(&pool).await.expect("migrate");
    SqliteUserRepository::new(pool)
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$fakehash".to_string(),
        role: UserRole::User,
    }
}

#[tokio::test]
async fn test_insert_and_find_by_id() {
    let repo = test_repo().await;

    let inserted = repo.insert(new_user("a@x.com")).await.unwrap();
    assert!(inserted.id > 0);
    assert_eq!(inserted.name, "Test User");
    assert_eq!(inserted.email, "a@x.com");
    assert_eq!(inserted.role, UserRole::User);
    assert!(!inserted.created_at.is_empty());
    assert_eq!(inserted.created_at, inserted.updated_at);

    let found = repo.find_by_id(inserted.id).await.unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().email, "a@x.com");
}

#[tokio::test]
async fn test_find_by_id_missing() {
    let repo = test_repo().await;
    let found = repo.find_by_id(999).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_by_email() {
    let repo = test_repo().await;
    repo.insert(new_user("b@x.com")).await.unwrap();

    assert!(repo.find_by_email("b@x.com").await.unwrap().is_some());
    assert!(repo.find_by_email("missing@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_duplicate_email_conflicts() {
    let repo = test_repo().await;
    repo.insert(new_user("dup@x.com")).await.unwrap();

    let result = repo.insert(new_user("dup@x.com")).await;
    assert!(matches!(result, Err(RepositoryError::AlreadyExists(_))));
}

#[tokio::test]
async fn test_find_all_ordered_by_id() {
    let repo = test_repo().await;
    repo.insert(new_user("first@x.com")).await.unwrap();
    repo.insert(new_user("second@x.com")).await.unwrap();

    let users = repo.find_all().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, "first@x.com");
    assert_eq!(users[1].email, "second@x.com");
}

#[tokio::test]
async fn test_update_partial_fields_only() {
    let repo = test_repo().await;
    let user = repo.insert(new_user("c@x.com")).await.unwrap();

    let updated = repo
        .update(
            user.id,
            UserChanges {
                name: Some("Renamed".to_string()),
                ..UserChanges::default()
            },
        )
        .await
        .unwrap();

    // Only the supplied field changed
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.email, "c@x.com");
    assert_eq!(updated.role, UserRole::User);
}

#[tokio::test]
async fn test_update_role() {
    let repo = test_repo().await;
    let user = repo.insert(new_user("d@x.com")).await.unwrap();

    let updated = repo
        .update(
            user.id,
            UserChanges {
                role: Some(UserRole::Admin),
                ..UserChanges::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.role, UserRole::Admin);
    assert_eq!(updated.name, "Test User");
}

#[tokio::test]
async fn test_update_missing_user() {
    let repo = test_repo().await;

    let result = repo
        .update(
            42,
            UserChanges {
                name: Some("Ghost".to_string()),
                ..UserChanges::default()
            },
        )
        .await;
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[tokio::test]
async fn test_update_duplicate_email_conflicts() {
    let repo = test_repo().await;
    repo.insert(new_user("taken@x.com")).await.unwrap();
    let user = repo.insert(new_user("free@x.com")).await.unwrap();

    let result = repo
        .update(
            user.id,
            UserChanges {
                email: Some("taken@x.com".to_string()),
                ..UserChanges::default()
            },
        )
        .await;
    assert!(matches!(result, Err(RepositoryError::AlreadyExists(_))));
}

#[tokio::test]
async fn test_delete_removes_row() {
    let repo = test_repo().await;
    let user = repo.insert(new_user("e@x.com")).await.unwrap();

    repo.delete(user.id).await.unwrap();
    assert!(repo.find_by_id(user.id).await.unwrap().is_none());

    // Deleting again reports NotFound
    let result = repo.delete(user.id).await;
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_missing_user() {
    let repo = test_repo().await;
    let result = repo.delete(1).await;
    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}
