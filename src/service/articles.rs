//! Article data access: translates typed articles to `blogful_articles` rows.

use crate::error::AppError;
use crate::extractors::Lookup;
use crate::model::{decode, Article, ArticlePatch, NewArticle};
use crate::schema::ARTICLES;
use crate::store::RowStore;
use async_trait::async_trait;

pub struct ArticlesService;

impl ArticlesService {
    /// All articles in id order.
    pub async fn list_all(store: &dyn RowStore) -> Result<Vec<Article>, AppError> {
        let rows = store.select_all(&ARTICLES).await?;
        Ok(rows.into_iter().map(decode::<Article>).collect::<Result<Vec<_>, _>>()?)
    }

    pub async fn get_by_id(store: &dyn RowStore, id: i32) -> Result<Option<Article>, AppError> {
        let row = store.select_by_id(&ARTICLES, id).await?;
        Ok(row.map(decode::<Article>).transpose()?)
    }

    /// Returns the stored article with generated `id` and `date_published`.
    pub async fn insert(store: &dyn RowStore, article: NewArticle) -> Result<Article, AppError> {
        let row = store.insert_into(&ARTICLES, article.into_record()).await?;
        Ok(decode::<Article>(row)?)
    }

    pub async fn update(store: &dyn RowStore, id: i32, patch: ArticlePatch) -> Result<u64, AppError> {
        Ok(store.update_by_id(&ARTICLES, id, patch.into_record()).await?)
    }

    pub async fn delete(store: &dyn RowStore, id: i32) -> Result<u64, AppError> {
        Ok(store.delete_by_id(&ARTICLES, id).await?)
    }
}

#[async_trait]
impl Lookup for Article {
    const LABEL: &'static str = "Article";

    async fn lookup(store: &dyn RowStore, id: i32) -> Result<Option<Self>, AppError> {
        ArticlesService::get_by_id(store, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryRowStore;

    fn new_article(title: &str) -> NewArticle {
        NewArticle {
            title: title.into(),
            style: "Listicle".into(),
            content: "new content".into(),
            author: None,
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = MemoryRowStore::new();
        let created = ArticlesService::insert(&store, new_article("new title")).await.unwrap();
        assert_eq!(created.id, 1);
        let fetched = ArticlesService::get_by_id(&store, created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
        assert_eq!(ArticlesService::get_by_id(&store, 2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_update_delete() {
        let store = MemoryRowStore::new();
        for title in ["First", "Second", "Third"] {
            ArticlesService::insert(&store, new_article(title)).await.unwrap();
        }
        let patch = ArticlePatch {
            content: Some("edited".into()),
            ..Default::default()
        };
        assert_eq!(ArticlesService::update(&store, 2, patch).await.unwrap(), 1);
        assert_eq!(ArticlesService::delete(&store, 1).await.unwrap(), 1);
        assert_eq!(ArticlesService::delete(&store, 1).await.unwrap(), 0);

        let all = ArticlesService::list_all(&store).await.unwrap();
        let titles: Vec<_> = all.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "Third"]);
        assert_eq!(all[0].content, "edited");
        assert_eq!(all[0].style, "Listicle");
    }
}
