//! Maven adapter for Gradle and Maven dependencies
//!
//! Looks a `group:artifact` up in Google's Android Maven repository first and
//! falls back to the Maven Central Search API.
//!
//! - Google: https://dl.google.com/android/maven2/{group path}/group-index.xml
//! - Maven Central: https://search.maven.org/solrsearch/select
//!   (q=g:{groupId}+AND+a:{artifactId}&core=gav&rows=100&wt=json)

use crate::cache::{CacheValue, ResultCache};
use crate::domain::PackageManager;
use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use crate::update::select_version;
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use tracing::{debug, warn};

/// Google Android Maven repository base URL
const GOOGLE_MAVEN_URL: &str = "https://dl.google.com/android/maven2";

/// Maven Central Search API base URL
const MAVEN_CENTRAL_API_URL: &str = "https://search.maven.org/solrsearch/select";

/// Maximum number of versions to fetch
const MAX_VERSIONS: u32 = 100;

/// Maven adapter (serves both Gradle and Maven entries)
pub struct MavenAdapter {
    client: HttpClient,
    cache: ResultCache,
    google_url: String,
    central_url: String,
}

/// Maven Central search response
#[derive(Debug, Deserialize)]
struct MavenSearchResponse {
    response: MavenResponseBody,
}

/// Maven Central response body
#[derive(Debug, Deserialize)]
struct MavenResponseBody {
    #[serde(default)]
    docs: Vec<MavenVersionDoc>,
}

/// Maven Central version document
#[derive(Debug, Deserialize)]
struct MavenVersionDoc {
    /// Version string
    v: String,
}

impl MavenAdapter {
    /// Create a new Maven adapter
    pub fn new(client: HttpClient, cache: ResultCache) -> Self {
        Self {
            client,
            cache,
            google_url: GOOGLE_MAVEN_URL.to_string(),
            central_url: MAVEN_CENTRAL_API_URL.to_string(),
        }
    }

    /// Point the adapter at other Google Maven and Maven Central endpoints
    pub fn with_base_urls(
        mut self,
        google_url: impl Into<String>,
        central_url: impl Into<String>,
    ) -> Self {
        self.google_url = google_url.into();
        self.central_url = central_url.into();
        self
    }

    /// Split `group:artifact`
    fn split_coordinates<'a>(&self, package: &'a str) -> Result<(&'a str, &'a str), RegistryError> {
        match package.trim().split_once(':') {
            Some((group, artifact))
                if !group.is_empty() && !artifact.is_empty() && !artifact.contains(':') =>
            {
                Ok((group, artifact))
            }
            _ => Err(RegistryError::invalid_package_name(
                package,
                self.registry_name(),
                "expected format 'groupId:artifactId'",
            )),
        }
    }

    fn google_index_url(&self, group: &str) -> String {
        format!(
            "{}/{}/group-index.xml",
            self.google_url,
            group.replace('.', "/")
        )
    }

    fn central_search_url(&self, group: &str, artifact: &str) -> String {
        format!(
            "{}?q=g:{}+AND+a:{}&core=gav&rows={}&wt=json",
            self.central_url, group, artifact, MAX_VERSIONS
        )
    }

    /// Versions of `group:artifact` in Google's repository, newest first
    ///
    /// A group Google does not host is cached as an empty list.
    async fn google_versions(
        &self,
        package: &str,
        group: &str,
        artifact: &str,
    ) -> Result<Vec<String>, RegistryError> {
        let key = format!("android:{}:{}", group, artifact);
        let value = self
            .cache
            .get_or_fetch(&key, move || async move {
                let url = self.google_index_url(group);
                match self.client.get_text(&url, package, "Google Maven").await {
                    Ok(xml) => parse_group_index(&xml, artifact)
                        .map(|mut versions| {
                            versions.reverse();
                            CacheValue::Versions(versions)
                        })
                        .map_err(|message| {
                            RegistryError::invalid_response(package, "Google Maven", message)
                        }),
                    Err(e) if e.is_not_found() => {
                        debug!("{} is not hosted on Google Maven", group);
                        Ok(CacheValue::Versions(Vec::new()))
                    }
                    Err(e) => Err(e),
                }
            })
            .await?;

        Ok(value.as_versions().map(<[String]>::to_vec).unwrap_or_default())
    }

    /// Versions of `group:artifact` on Maven Central, newest first
    async fn central_versions(
        &self,
        package: &str,
        group: &str,
        artifact: &str,
    ) -> Result<Vec<String>, RegistryError> {
        let key = format!("maven:{}:{}", group, artifact);
        let value = self
            .cache
            .get_or_fetch(&key, move || async move {
                let url = self.central_search_url(group, artifact);
                let response: MavenSearchResponse = self
                    .client
                    .get_json(&url, package, "Maven Central")
                    .await?;
                let versions = response.response.docs.into_iter().map(|doc| doc.v).collect();
                Ok::<_, RegistryError>(CacheValue::Versions(versions))
            })
            .await?;

        Ok(value.as_versions().map(<[String]>::to_vec).unwrap_or_default())
    }
}

/// Read the `versions` attribute of `<artifact>` inside a group index
///
/// The attribute is a comma-separated list, oldest to newest. Returns an
/// empty list when the artifact is not listed.
fn parse_group_index(xml: &str, artifact: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;

    loop {
        let (element, opens) = match reader.read_event() {
            Ok(Event::Start(e)) => (e, true),
            Ok(Event::Empty(e)) => (e, false),
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                continue;
            }
            Ok(Event::Eof) => return Ok(Vec::new()),
            Ok(_) => continue,
            Err(e) => return Err(format!("failed to parse group index: {}", e)),
        };

        if depth == 1 && element.name().as_ref() == artifact.as_bytes() {
            for attr in element.attributes().flatten() {
                if attr.key.as_ref() == b"versions" {
                    let versions = String::from_utf8_lossy(&attr.value);
                    return Ok(versions
                        .split(',')
                        .map(str::trim)
                        .filter(|v| !v.is_empty())
                        .map(str::to_string)
                        .collect());
                }
            }
            return Ok(Vec::new());
        }

        if opens {
            depth += 1;
        }
    }
}

#[async_trait]
impl RegistryAdapter for MavenAdapter {
    fn package_manager(&self) -> PackageManager {
        PackageManager::Maven
    }

    fn registry_name(&self) -> &'static str {
        "Maven"
    }

    async fn fetch_latest(
        &self,
        package: &str,
        current: Option<&str>,
    ) -> Result<String, RegistryError> {
        let (group, artifact) = self.split_coordinates(package)?;

        match self.google_versions(package, group, artifact).await {
            Ok(versions) => {
                let latest = select_version(&versions, current);
                if !latest.is_empty() {
                    return Ok(latest);
                }
            }
            Err(e) => warn!("{}, falling back to Maven Central", e),
        }

        let versions = self.central_versions(package, group, artifact).await?;
        Ok(select_version(&versions, current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    const APPCOMPAT_INDEX: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<androidx.appcompat>
  <appcompat versions="1.5.0,1.6.0,1.7.0-alpha01,1.6.1"/>
  <appcompat-resources versions="1.5.0,1.6.1"/>
</androidx.appcompat>"#;

    const GUAVA_SEARCH: &str = r#"{
        "response": {
            "numFound": 3,
            "docs": [
                {"id": "com.google.guava:guava:33.0.0-jre", "g": "com.google.guava", "a": "guava", "v": "33.0.0-jre"},
                {"id": "com.google.guava:guava:32.1.3-jre", "g": "com.google.guava", "a": "guava", "v": "32.1.3-jre"},
                {"id": "com.google.guava:guava:31.1-jre", "g": "com.google.guava", "a": "guava", "v": "31.1-jre"}
            ]
        }
    }"#;

    fn adapter(server: &Server, cache: ResultCache) -> MavenAdapter {
        let client = HttpClient::new()
            .unwrap()
            .with_max_retries(0)
            .with_base_delay(Duration::ZERO);
        MavenAdapter::new(client, cache).with_base_urls(
            format!("{}/google", server.url()),
            format!("{}/solrsearch/select", server.url()),
        )
    }

    fn central_path() -> Matcher {
        Matcher::Regex(r"^/solrsearch/select".to_string())
    }

    #[test]
    fn test_maven_adapter_package_manager() {
        let adapter = MavenAdapter::new(HttpClient::new().unwrap(), ResultCache::default());
        assert_eq!(adapter.package_manager(), PackageManager::Maven);
        assert_eq!(adapter.registry_name(), "Maven");
    }

    #[test]
    fn test_build_urls() {
        let adapter = MavenAdapter::new(HttpClient::new().unwrap(), ResultCache::default());
        assert_eq!(
            adapter.google_index_url("androidx.appcompat"),
            "https://dl.google.com/android/maven2/androidx/appcompat/group-index.xml"
        );
        assert_eq!(
            adapter.central_search_url("com.google.guava", "guava"),
            "https://search.maven.org/solrsearch/select?q=g:com.google.guava+AND+a:guava&core=gav&rows=100&wt=json"
        );
    }

    #[test]
    fn test_split_coordinates() {
        let adapter = MavenAdapter::new(HttpClient::new().unwrap(), ResultCache::default());
        assert_eq!(
            adapter.split_coordinates("org.springframework:spring-core").unwrap(),
            ("org.springframework", "spring-core")
        );
        assert!(adapter.split_coordinates("guava").is_err());
        assert!(adapter.split_coordinates(":guava").is_err());
        assert!(adapter.split_coordinates("a:b:c").is_err());
    }

    #[test]
    fn test_parse_group_index() {
        let versions = parse_group_index(APPCOMPAT_INDEX, "appcompat").unwrap();
        assert_eq!(versions, vec!["1.5.0", "1.6.0", "1.7.0-alpha01", "1.6.1"]);

        let versions = parse_group_index(APPCOMPAT_INDEX, "appcompat-resources").unwrap();
        assert_eq!(versions, vec!["1.5.0", "1.6.1"]);

        assert!(parse_group_index(APPCOMPAT_INDEX, "core").unwrap().is_empty());
    }

    #[test]
    fn test_parse_group_index_ignores_root_name() {
        let xml = r#"<appcompat><other versions="1.0"/></appcompat>"#;
        assert!(parse_group_index(xml, "appcompat").unwrap().is_empty());
    }

    #[test]
    fn test_parse_group_index_rejects_malformed_xml() {
        assert!(parse_group_index("<a><b versions=\"1.0\"></a>", "c").is_err());
    }

    #[tokio::test]
    async fn test_invalid_package_name() {
        let adapter = MavenAdapter::new(HttpClient::new().unwrap(), ResultCache::default());
        let result = adapter.fetch_latest("guava", None).await;
        assert!(matches!(
            result,
            Err(RegistryError::InvalidPackageName { .. })
        ));
    }

    #[tokio::test]
    async fn test_google_hit_skips_central() {
        let mut server = Server::new_async().await;
        let google = server
            .mock("GET", "/google/androidx/appcompat/group-index.xml")
            .with_status(200)
            .with_body(APPCOMPAT_INDEX)
            .create_async()
            .await;
        let central = server
            .mock("GET", central_path())
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let cache = ResultCache::default();
        let adapter = adapter(&server, cache.clone());
        let latest = adapter
            .fetch_latest("androidx.appcompat:appcompat", Some("1.5.0"))
            .await
            .unwrap();

        google.assert_async().await;
        central.assert_async().await;
        // Reversed list is scanned newest first; the alpha is skipped
        assert_eq!(latest, "1.6.1");
        assert!(cache.try_get("android:androidx.appcompat:appcompat").is_some());
    }

    #[tokio::test]
    async fn test_google_scan_follows_published_order() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/google/androidx/appcompat/group-index.xml")
            .with_status(200)
            .with_body(APPCOMPAT_INDEX)
            .create_async()
            .await;

        let adapter = adapter(&server, ResultCache::default());
        let latest = adapter
            .fetch_latest("androidx.appcompat:appcompat", Some("1.7.0-alpha00"))
            .await
            .unwrap();
        assert_eq!(latest, "1.6.1");
    }

    #[tokio::test]
    async fn test_google_miss_falls_back_to_central() {
        let mut server = Server::new_async().await;
        let google = server
            .mock("GET", "/google/com/google/guava/group-index.xml")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;
        let central = server
            .mock("GET", central_path())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(GUAVA_SEARCH)
            .expect(1)
            .create_async()
            .await;

        let cache = ResultCache::default();
        let adapter = adapter(&server, cache.clone());
        let first = adapter
            .fetch_latest("com.google.guava:guava", Some("31.1-jre"))
            .await
            .unwrap();
        let second = adapter
            .fetch_latest("com.google.guava:guava", Some("31.1-jre"))
            .await
            .unwrap();

        google.assert_async().await;
        central.assert_async().await;
        assert_eq!(first, "33.0.0-jre");
        assert_eq!(second, "33.0.0-jre");
        assert_eq!(
            cache
                .try_get("android:com.google.guava:guava")
                .and_then(|v| v.as_versions().map(<[String]>::len)),
            Some(0)
        );
        assert!(cache.try_get("maven:com.google.guava:guava").is_some());
    }

    #[tokio::test]
    async fn test_central_failure_is_reported() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/google/org/example/group-index.xml")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", central_path())
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let cache = ResultCache::default();
        let adapter = adapter(&server, cache.clone());
        let result = adapter.fetch_latest("org.example:lib", None).await;

        assert!(matches!(result, Err(RegistryError::ServerError { .. })));
        assert!(cache.try_get("maven:org.example:lib").is_none());
    }
}
