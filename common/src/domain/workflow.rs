use crate::domain::entities::{Article, ArticleId, Draft, DraftId, SaveStamp, next_id};
use crate::domain::input::PostInput;
use crate::domain::markup;
use crate::domain::repository::{ContentRepository, RepositoryError};
use crate::domain::session::EditorSession;

/// Draft save, publish, update and delete on top of a [`ContentRepository`].
///
/// Operations that change content or expose drafts take an [`EditorSession`]; the
/// workflow itself performs no further authorization. Each operation is a full
/// load, modify in memory, save sequence without locking, so overlapping calls on
/// the same collection can overwrite each other's changes.
#[derive(Debug, Clone)]
pub struct PublishingWorkflow<R: ContentRepository> {
    repository: R,
}

impl<R: ContentRepository> PublishingWorkflow<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Creates or fully replaces a draft and returns its id.
    ///
    /// An explicit id is used as is, even when no draft carries it yet.
    pub async fn save_draft(
        &self,
        _session: &EditorSession,
        input: &PostInput,
        existing_draft_id: Option<DraftId>,
    ) -> Result<DraftId, RepositoryError> {
        let mut drafts: Vec<Draft> = self.repository.load_all().await;

        let id = existing_draft_id.unwrap_or_else(|| next_id(&drafts));
        let draft = Draft::new(id, input, input.tags(), &SaveStamp::now());

        match drafts.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => {
                *existing = draft;
                tracing::info!("updated draft {}", id);
            }
            None => {
                drafts.push(draft);
                tracing::info!("created draft {}", id);
            }
        }

        self.repository.save_all(&drafts).await?;
        Ok(id)
    }

    /// Publishes the input as an article and returns the article id.
    ///
    /// With `existing_post_id` pointing at an article, that article is merged with the
    /// input; an unknown id falls back to creating a new article. With
    /// `source_draft_id`, the draft is removed once the article is saved.
    pub async fn publish_post(
        &self,
        _session: &EditorSession,
        input: &PostInput,
        existing_post_id: Option<ArticleId>,
        source_draft_id: Option<DraftId>,
    ) -> Result<ArticleId, RepositoryError> {
        let mut articles: Vec<Article> = self.repository.load_all().await;
        let drafts: Vec<Draft> = self.repository.load_all().await;

        let tags = input.tags();
        let rendered = input.content().map(markup::render);
        let date = SaveStamp::now().date;

        let position = existing_post_id
            .and_then(|id| articles.iter().position(|article| article.id == id));

        let id = match position {
            Some(index) => {
                let article = &mut articles[index];
                article.merge(input, rendered, tags, date);
                tracing::info!("updated article {}", article.id);
                article.id
            }
            None => {
                if let Some(missing) = existing_post_id {
                    tracing::info!("article {} not found, publishing as new article", missing);
                }
                let id = next_id(&articles);
                articles.push(Article::new(id, input, rendered, tags, date));
                tracing::info!("published article {}", id);
                id
            }
        };

        self.repository.save_all(&articles).await?;

        if let Some(draft_id) = source_draft_id {
            let remaining = without(drafts, |draft| draft.id == draft_id);
            self.repository.save_all(&remaining).await?;
            tracing::info!("removed draft {} after publishing article {}", draft_id, id);
        }

        Ok(id)
    }

    /// Deleting an unknown id leaves the collection as it is.
    pub async fn delete_draft(
        &self,
        _session: &EditorSession,
        id: DraftId,
    ) -> Result<(), RepositoryError> {
        let drafts: Vec<Draft> = self.repository.load_all().await;
        let remaining = without(drafts, |draft| draft.id == id);
        self.repository.save_all(&remaining).await?;
        tracing::info!("deleted draft {}", id);
        Ok(())
    }

    /// Deleting an unknown id leaves the collection as it is.
    pub async fn delete_post(
        &self,
        _session: &EditorSession,
        id: ArticleId,
    ) -> Result<(), RepositoryError> {
        let articles: Vec<Article> = self.repository.load_all().await;
        let remaining = without(articles, |article| article.id == id);
        self.repository.save_all(&remaining).await?;
        tracing::info!("deleted article {}", id);
        Ok(())
    }

    pub async fn list_articles(&self) -> Vec<Article> {
        self.repository.load_all().await
    }

    pub async fn find_article(&self, id: ArticleId) -> Option<Article> {
        self.list_articles()
            .await
            .into_iter()
            .find(|article| article.id == id)
    }

    pub async fn list_drafts(&self, _session: &EditorSession) -> Vec<Draft> {
        self.repository.load_all().await
    }

    pub async fn find_draft(&self, session: &EditorSession, id: DraftId) -> Option<Draft> {
        self.list_drafts(session)
            .await
            .into_iter()
            .find(|draft| draft.id == id)
    }
}

fn without<T>(entities: Vec<T>, matches: impl Fn(&T) -> bool) -> Vec<T> {
    entities.into_iter().filter(|entity| !matches(entity)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_TAG;
    use crate::domain::entities::{CollectionKind, Tags};
    use crate::domain::session::PasswordGate;
    use crate::test_utils::InMemoryRepository;

    fn workflow() -> PublishingWorkflow<InMemoryRepository> {
        PublishingWorkflow::new(InMemoryRepository::default())
    }

    fn session() -> EditorSession {
        PasswordGate::new("pw").login("pw").unwrap()
    }

    fn input(title: &str, content: &str, tags: &str) -> PostInput {
        PostInput {
            title: Some(title.into()),
            content: Some(content.into()),
            tags: Some(tags.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_draft_allocates_ids() {
        let workflow = workflow();
        let session = session();

        let first = workflow.save_draft(&session, &input("a", "", ""), None).await.unwrap();
        let second = workflow.save_draft(&session, &input("b", "", ""), None).await.unwrap();

        assert_eq!(first, DraftId(1));
        assert_eq!(second, DraftId(2));
        assert_eq!(workflow.list_drafts(&session).await.len(), 2);
    }

    #[tokio::test]
    async fn test_save_draft_updates_in_place() {
        let workflow = workflow();
        let session = session();
        let id = workflow
            .save_draft(&session, &input("first", "one", "x"), None)
            .await
            .unwrap();
        workflow.save_draft(&session, &input("other", "", ""), None).await.unwrap();

        let same = workflow
            .save_draft(&session, &input("second", "two", "y, z"), Some(id))
            .await
            .unwrap();

        assert_eq!(same, id);
        let drafts = workflow.list_drafts(&session).await;
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].id, id);
        assert_eq!(drafts[0].title, "second");
        assert_eq!(drafts[0].content, "two");
        assert_eq!(drafts[0].tags.to_strings(), vec!["y", "z"]);
    }

    #[tokio::test]
    async fn test_save_draft_with_unknown_id_keeps_it() {
        let workflow = workflow();
        let session = session();

        let id = workflow
            .save_draft(&session, &PostInput::default(), Some(DraftId(42)))
            .await
            .unwrap();

        assert_eq!(id, DraftId(42));
        let draft = workflow.find_draft(&session, id).await.unwrap();
        assert_eq!(draft.title, crate::DEFAULT_DRAFT_TITLE);
        assert_eq!(draft.tags.to_strings(), vec![DEFAULT_TAG]);
    }

    #[tokio::test]
    async fn test_publish_new_renders_content() {
        let workflow = workflow();
        let session = session();
        let raw = "# Title\n\nSome *text*";

        let id = workflow
            .publish_post(&session, &input("Post", raw, "news"), None, None)
            .await
            .unwrap();

        let article = workflow.find_article(id).await.unwrap();
        assert_eq!(id, ArticleId(1));
        assert_eq!(article.raw_content, raw);
        assert_eq!(article.content, markup::render(raw));
        assert_eq!(article.tags.to_strings(), vec!["news"]);
    }

    #[tokio::test]
    async fn test_publish_new_keeps_empty_fields() {
        let workflow = workflow();
        let session = session();

        let id = workflow
            .publish_post(&session, &PostInput::default(), None, None)
            .await
            .unwrap();

        let article = workflow.find_article(id).await.unwrap();
        assert_eq!(article.title, "");
        assert_eq!(article.author, "");
        assert_eq!(article.content, "");
        assert_eq!(article.raw_content, "");
        assert_eq!(article.tags, Tags::default());
    }

    #[tokio::test]
    async fn test_publish_removes_only_source_draft() {
        let workflow = workflow();
        let session = session();
        let keep = workflow.save_draft(&session, &input("keep", "", ""), None).await.unwrap();
        let promote = workflow
            .save_draft(&session, &input("promote", "body", ""), None)
            .await
            .unwrap();

        workflow
            .publish_post(&session, &input("promote", "body", ""), None, Some(promote))
            .await
            .unwrap();

        let drafts = workflow.list_drafts(&session).await;
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].id, keep);
        assert_eq!(drafts[0].title, "keep");
    }

    #[tokio::test]
    async fn test_publish_update_merges_fields() {
        let workflow = workflow();
        let session = session();
        let mut original = input("Original", "old body", "a, b");
        original.author = Some("Ann".into());
        original.excerpt = Some("short".into());
        let id = workflow.publish_post(&session, &original, None, None).await.unwrap();

        let update = PostInput {
            excerpt: Some("longer".into()),
            ..Default::default()
        };
        let updated = workflow
            .publish_post(&session, &update, Some(id), None)
            .await
            .unwrap();

        assert_eq!(updated, id);
        let article = workflow.find_article(id).await.unwrap();
        assert_eq!(article.title, "Original");
        assert_eq!(article.author, "Ann");
        assert_eq!(article.excerpt, "longer");
        assert_eq!(article.raw_content, "old body");
        assert_eq!(article.content, markup::render("old body"));
        // tags always replace, even with the default
        assert_eq!(article.tags, Tags::default());
        assert_eq!(workflow.list_articles().await.len(), 1);
    }

    #[tokio::test]
    async fn test_publish_update_replaces_content() {
        let workflow = workflow();
        let session = session();
        let id = workflow
            .publish_post(&session, &input("T", "old", ""), None, None)
            .await
            .unwrap();

        workflow
            .publish_post(&session, &input("", "**new**", "t"), Some(id), None)
            .await
            .unwrap();

        let article = workflow.find_article(id).await.unwrap();
        assert_eq!(article.title, "T");
        assert_eq!(article.raw_content, "**new**");
        assert_eq!(article.content, "<p><strong>new</strong></p>");
    }

    #[tokio::test]
    async fn test_publish_update_unknown_id_creates_new() {
        let workflow = workflow();
        let session = session();
        workflow.publish_post(&session, &input("one", "", ""), None, None).await.unwrap();

        let id = workflow
            .publish_post(&session, &input("two", "", ""), Some(ArticleId(99)), None)
            .await
            .unwrap();

        assert_eq!(id, ArticleId(2));
        assert_eq!(workflow.list_articles().await.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let workflow = workflow();
        let session = session();
        workflow.save_draft(&session, &input("d", "", ""), None).await.unwrap();
        workflow.publish_post(&session, &input("p", "", ""), None, None).await.unwrap();

        workflow.delete_draft(&session, DraftId(7)).await.unwrap();
        workflow.delete_post(&session, ArticleId(7)).await.unwrap();

        assert_eq!(workflow.list_drafts(&session).await.len(), 1);
        assert_eq!(workflow.list_articles().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let workflow = workflow();
        let session = session();
        let draft = workflow.save_draft(&session, &input("d", "", ""), None).await.unwrap();
        let post = workflow.publish_post(&session, &input("p", "", ""), None, None).await.unwrap();

        workflow.delete_draft(&session, draft).await.unwrap();
        workflow.delete_post(&session, post).await.unwrap();

        assert!(workflow.list_drafts(&session).await.is_empty());
        assert!(workflow.find_article(post).await.is_none());
    }

    #[tokio::test]
    async fn test_publish_write_failure_surfaces() {
        let workflow = workflow();
        let session = session();
        workflow.repository().fail_writes(CollectionKind::Articles, true);

        let err = workflow
            .publish_post(&session, &input("p", "body", ""), None, None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), CollectionKind::Articles);
        assert!(workflow.repository().raw(CollectionKind::Articles).is_none());
    }

    #[tokio::test]
    async fn test_publish_keeps_article_when_draft_removal_fails() {
        let workflow = workflow();
        let session = session();
        let draft = workflow
            .save_draft(&session, &input("promote", "body", ""), None)
            .await
            .unwrap();
        workflow.repository().fail_writes(CollectionKind::Drafts, true);

        let err = workflow
            .publish_post(&session, &input("promote", "body", ""), None, Some(draft))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), CollectionKind::Drafts);
        let articles = workflow.list_articles().await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "promote");
        assert!(workflow.find_draft(&session, draft).await.is_some());
    }

    #[tokio::test]
    async fn test_save_draft_write_failure_surfaces() {
        let workflow = workflow();
        let session = session();
        workflow.save_draft(&session, &input("kept", "", ""), None).await.unwrap();
        workflow.repository().fail_writes(CollectionKind::Drafts, true);

        let err = workflow
            .save_draft(&session, &input("lost", "", ""), None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), CollectionKind::Drafts);
        let drafts = workflow.list_drafts(&session).await;
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "kept");
    }

    #[tokio::test]
    async fn test_delete_write_failure_surfaces() {
        let workflow = workflow();
        let session = session();
        let draft = workflow.save_draft(&session, &input("d", "", ""), None).await.unwrap();
        let post = workflow.publish_post(&session, &input("p", "", ""), None, None).await.unwrap();
        workflow.repository().fail_writes(CollectionKind::Drafts, true);
        workflow.repository().fail_writes(CollectionKind::Articles, true);

        let err = workflow.delete_draft(&session, draft).await.unwrap_err();
        assert_eq!(err.kind(), CollectionKind::Drafts);
        let err = workflow.delete_post(&session, post).await.unwrap_err();
        assert_eq!(err.kind(), CollectionKind::Articles);

        assert!(workflow.find_draft(&session, draft).await.is_some());
        assert!(workflow.find_article(post).await.is_some());
    }

    #[tokio::test]
    async fn test_save_draft_after_top_of_range_id() {
        let workflow = workflow();
        let session = session();
        workflow
            .save_draft(&session, &input("top", "", ""), Some(DraftId(u64::MAX)))
            .await
            .unwrap();

        let id = workflow.save_draft(&session, &input("next", "", ""), None).await.unwrap();

        assert_eq!(id, DraftId(1));
        assert_eq!(workflow.list_drafts(&session).await.len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_drafts_recover_as_empty() {
        let workflow = workflow();
        let session = session();
        workflow.repository().put_raw(CollectionKind::Drafts, "garbage");

        let id = workflow.save_draft(&session, &input("fresh", "", ""), None).await.unwrap();

        assert_eq!(id, DraftId(1));
        assert_eq!(workflow.list_drafts(&session).await.len(), 1);
    }
}
