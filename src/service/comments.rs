//! Comment data access over `blogful_comments`.

use crate::error::AppError;
use crate::extractors::Lookup;
use crate::model::{decode, Comment, CommentPatch, NewComment};
use crate::schema::COMMENTS;
use crate::store::RowStore;
use async_trait::async_trait;

pub struct CommentsService;

impl CommentsService {
    pub async fn list_all(store: &dyn RowStore) -> Result<Vec<Comment>, AppError> {
        let rows = store.select_all(&COMMENTS).await?;
        Ok(rows.into_iter().map(decode::<Comment>).collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn get_by_id(store: &dyn RowStore, id: i32) -> Result<Option<Comment>, AppError> {
        let row = store.select_by_id(&COMMENTS, id).await?;
        Ok(row.map(decode::<Comment>).transpose()?)
    }

    pub async fn insert(store: &dyn RowStore, comment: NewComment) -> Result<Comment, AppError> {
        let row = store.insert_into(&COMMENTS, comment.into_record()).await?;
        Ok(decode::<Comment>(row)?)
    }

    pub async fn update(store: &dyn RowStore, id: i32, patch: CommentPatch) -> Result<u64, AppError> {
        Ok(store.update_by_id(&COMMENTS, id, patch.into_record()).await?)
    }

    pub async fn delete(store: &dyn RowStore, id: i32) -> Result<u64, AppError> {
        Ok(store.delete_by_id(&COMMENTS, id).await?)
    }
}

#[async_trait]
impl Lookup for Comment {
    const LABEL: &'static str = "Comment";

    async fn lookup(store: &dyn RowStore, id: i32) -> Result<Option<Self>, AppError> {
        CommentsService::get_by_id(store, id).await
    }
}
