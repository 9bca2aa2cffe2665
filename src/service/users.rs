//! User data access over `blogful_users`.

use crate::error::AppError;
use crate::extractors::Lookup;
use crate::model::{decode, NewUser, User, UserPatch};
use crate::schema::USERS;
use crate::store::RowStore;
use async_trait::async_trait;

pub struct UsersService;

impl UsersService {
    pub async fn list_all(store: &dyn RowStore) -> Result<Vec<User>, AppError> {
        let rows = store.select_all(&USERS).await?;
        Ok(rows.into_iter().map(decode::<User>).collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn get_by_id(store: &dyn RowStore, id: i32) -> Result<Option<User>, AppError> {
        let row = store.select_by_id(&USERS, id).await?;
        Ok(row.map(decode::<User>).transpose()?)
    }

    pub async fn insert(store: &dyn RowStore, user: NewUser) -> Result<User, AppError> {
        let row = store.insert_into(&USERS, user.into_record()).await?;
        Ok(decode::<User>(row)?)
    }

    pub async fn update(store: &dyn RowStore, id: i32, patch: UserPatch) -> Result<u64, AppError> {
        Ok(store.update_by_id(&USERS, id, patch.into_record()).await?)
    }

    /// Deleting a user removes their comments and clears authorship of their articles.
    pub async fn delete(store: &dyn RowStore, id: i32) -> Result<u64, AppError> {
        Ok(store.delete_by_id(&USERS, id).await?)
    }
}

#[async_trait]
impl Lookup for User {
    const LABEL: &'static str = "User";

    async fn lookup(store: &dyn RowStore, id: i32) -> Result<Option<Self>, AppError> {
        UsersService::get_by_id(store, id).await
    }
}
