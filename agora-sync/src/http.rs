use agora_api::{
    Backend, CommentEdit, CommentId, CommentPage, ContentId, ContentKind, Error, NewComment,
    Reaction,
};
use anyhow::{anyhow, Context};
use async_trait::async_trait;

/// REST implementation of the comment backend.
pub struct HttpBackend {
    client: reqwest::Client,
    host: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(host: String, token: Option<String>) -> HttpBackend {
        HttpBackend {
            client: reqwest::Client::new(),
            host,
            token,
        }
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn expect_success(resp: reqwest::Response) -> anyhow::Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.bytes().await.context("reading error response")?;
        Err(match Error::parse(&body) {
            Ok(err) => anyhow::Error::from(err),
            Err(_) => anyhow!("server returned {status}"),
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_comments(
        &mut self,
        content: &ContentId,
        kind: ContentKind,
        page: u32,
        limit: u32,
    ) -> anyhow::Result<CommentPage> {
        let page = page.to_string();
        let limit = limit.to_string();
        let req = self
            .client
            .get(format!("{}/api/comments", self.host))
            .query(&[
                ("contentId", content.0.as_str()),
                ("contentType", kind.as_str()),
                ("page", page.as_str()),
                ("limit", limit.as_str()),
            ]);
        let resp = self
            .with_auth(req)
            .send()
            .await
            .context("fetching comments")?;
        let resp = Self::expect_success(resp).await?;
        resp.json().await.context("parsing comments from server")
    }

    async fn create_comment(
        &mut self,
        content: &ContentId,
        kind: ContentKind,
        new: NewComment,
    ) -> anyhow::Result<CommentId> {
        #[derive(serde::Deserialize)]
        struct Created {
            id: CommentId,
        }

        let req = self
            .client
            .post(format!("{}/api/comments", self.host))
            .query(&[
                ("contentId", content.0.as_str()),
                ("contentType", kind.as_str()),
            ])
            .json(&new);
        let resp = self
            .with_auth(req)
            .send()
            .await
            .context("posting comment")?;
        let resp = Self::expect_success(resp).await?;
        let created: Created = resp.json().await.context("parsing created comment id")?;
        Ok(created.id)
    }

    async fn update_comment(
        &mut self,
        comment: &CommentId,
        edit: CommentEdit,
    ) -> anyhow::Result<()> {
        let req = self
            .client
            .patch(format!("{}/api/comments/{}", self.host, comment.0))
            .json(&edit);
        let resp = self
            .with_auth(req)
            .send()
            .await
            .context("updating comment")?;
        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn delete_comment(&mut self, comment: &CommentId) -> anyhow::Result<()> {
        let req = self
            .client
            .delete(format!("{}/api/comments/{}", self.host, comment.0));
        let resp = self
            .with_auth(req)
            .send()
            .await
            .context("deleting comment")?;
        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn toggle_reaction(
        &mut self,
        comment: &CommentId,
        reaction: Reaction,
    ) -> anyhow::Result<()> {
        let req = self
            .client
            .post(format!("{}/api/comments/{}/reaction", self.host, comment.0))
            .json(&serde_json::json!({ "reaction": reaction }));
        let resp = self
            .with_auth(req)
            .send()
            .await
            .context("toggling reaction")?;
        Self::expect_success(resp).await?;
        Ok(())
    }
}
