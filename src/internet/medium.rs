//! Medium GraphQL client
//!
//! Fetches a post by id and converts it to Markdown.

use std::time::Duration;

use log::{debug, info};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use super::post::{post_to_markdown, MediumPostResponse};

/// Public GraphQL endpoint
pub const DEFAULT_MEDIUM_ENDPOINT: &str = "https://medium.com/_/graphql";

/// Default request timeout (seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 10;

const POST_QUERY: &str = r#"
query PostById($id: ID!) {
  post(id: $id) {
    title
    createdAt
    creator {
      id
      name
    }
    content {
      bodyModel {
        paragraphs {
          text
          type
          href
          layout
          markups {
            title
            type
            href
            userId
            start
            end
            anchorType
          }
          iframe {
            mediaResource {
              href
              iframeSrc
              iframeWidth
              iframeHeight
            }
          }
          metadata {
            id
            originalWidth
            originalHeight
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Error)]
pub enum MediumError {
    #[error("error executing request: {0}")]
    Http(#[from] reqwest::Error),
    #[error("medium returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("error un-marshalling medium response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("post {0} not found")]
    NotFound(String),
}

/// Connection settings for the Medium client
#[derive(Debug, Clone)]
pub struct MediumConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,

    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for MediumConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_MEDIUM_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertMediumToMdOutput {
    pub post_id: String,
    pub markdown: String,
}

#[derive(Serialize)]
struct GraphQlQuery<'a> {
    query: &'static str,
    variables: PostVariables<'a>,
}

#[derive(Serialize)]
struct PostVariables<'a> {
    id: &'a str,
}

impl<'a> GraphQlQuery<'a> {
    /// Post lookup with the id passed as a variable, never spliced into the query text
    fn post(post_id: &'a str) -> Self {
        Self {
            query: POST_QUERY,
            variables: PostVariables { id: post_id },
        }
    }
}

pub struct MediumClient {
    client: Client,
    config: MediumConfig,
}

impl MediumClient {
    /// Build a client with the given endpoint and timeout
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: MediumConfig) -> Result<Self, MediumError> {
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch the raw post model
    ///
    /// # Errors
    /// Fails when the request cannot be sent, the status is not a success,
    /// the body does not match the post model or no post has this id.
    pub async fn fetch_post(&self, post_id: &str) -> Result<MediumPostResponse, MediumError> {
        let body = GraphQlQuery::post(post_id);

        debug!("POST {} for post {}", self.config.endpoint, post_id);
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MediumError::Status(status));
        }

        let bytes = response.bytes().await?;
        let post: MediumPostResponse = serde_json::from_slice(&bytes)?;
        if post.data.post.is_none() {
            return Err(MediumError::NotFound(post_id.to_string()));
        }

        Ok(post)
    }

    /// Fetch a post and render it as Markdown
    pub async fn convert_medium_to_md(
        &self,
        post_id: &str,
    ) -> Result<ConvertMediumToMdOutput, MediumError> {
        let post = self.fetch_post(post_id).await?;
        let markdown = post_to_markdown(&post);
        info!("converted post {} ({} bytes of markdown)", post_id, markdown.len());

        Ok(ConvertMediumToMdOutput {
            post_id: post_id.to_string(),
            markdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    const POST_JSON: &str = r#"{"data":{"post":{"title":"Hello","creator":{"id":"u1","name":"Ana"},"content":{"bodyModel":{"paragraphs":[{"text":"First words.","type":"P","markups":[]}]}}}}}"#;

    /// Serve one canned HTTP response on a local port.
    /// Returns the endpoint and a handle yielding the raw request that was received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/graphql", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (endpoint, handle)
    }

    /// Read headers plus a `content-length` body
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buf).into_owned()
    }

    fn client_for(endpoint: String) -> MediumClient {
        MediumClient::new(MediumConfig {
            endpoint,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = MediumConfig::default();
        assert_eq!(config.endpoint, DEFAULT_MEDIUM_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_post_id_sent_as_variable() {
        let body = serde_json::to_value(GraphQlQuery::post(r#"ab"c"#)).unwrap();

        assert_eq!(body["variables"]["id"], r#"ab"c"#);
        let query = body["query"].as_str().unwrap();
        assert!(query.contains("post(id: $id)"));
        assert!(!query.contains(r#"ab"c"#));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let client = MediumClient::new(MediumConfig {
            endpoint: "http://127.0.0.1:9/graphql".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let err = client.fetch_post("abc").await.unwrap_err();
        assert!(matches!(err, MediumError::Http(_)));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let (endpoint, server) = serve_once("500 Internal Server Error", "{}").await;

        let err = client_for(endpoint).fetch_post("abc").await.unwrap_err();
        assert!(matches!(err, MediumError::Status(status) if status.as_u16() == 500));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_body_not_json() {
        let (endpoint, server) = serve_once("200 OK", "<html>nope</html>").await;

        let err = client_for(endpoint).fetch_post("abc").await.unwrap_err();
        assert!(matches!(err, MediumError::Decode(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_null_post_is_not_found() {
        let (endpoint, server) = serve_once("200 OK", r#"{"data":{"post":null}}"#).await;

        let err = client_for(endpoint).fetch_post("missing").await.unwrap_err();
        assert!(matches!(&err, MediumError::NotFound(id) if id == "missing"));
        assert_eq!(err.to_string(), "post missing not found");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_convert_medium_to_md() {
        let (endpoint, server) = serve_once("200 OK", POST_JSON).await;

        let output = client_for(endpoint).convert_medium_to_md("f744fbff033e").await.unwrap();
        assert_eq!(output.post_id, "f744fbff033e");
        assert_eq!(output.markdown, "# Hello\nBy Ana\n\nFirst words.\n");

        let request = server.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /graphql "));
        assert!(lower.contains("accept: application/json\r\n"));
        assert!(lower.contains("content-type: application/json; charset=utf-8\r\n"));

        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(body["variables"]["id"], "f744fbff033e");
        assert!(body["query"].as_str().unwrap().contains("bodyModel"));
    }
}
