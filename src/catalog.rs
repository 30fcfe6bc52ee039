use crate::error::LoadFailure;
use crate::fetch::{CatalogSource, fetch_catalog};
use crate::game::Game;
use std::collections::HashMap;
use std::time::Duration;

/// Outcome of the one catalog request a page makes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loaded,
    Failed(String),
}

/// In-memory game catalog: loaded once, read-only afterwards.
#[derive(Debug, Default)]
pub struct CatalogStore {
    games: Vec<Game>,
    by_slug: HashMap<String, usize>,
    by_title: HashMap<String, usize>,
    status: LoadStatus,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store already holding `games`, as if loaded.
    pub fn from_games(games: Vec<Game>) -> Self {
        let mut store = Self::new();
        store.install(games);
        store
    }

    /// Fetch and install the catalog. Only the first call touches the
    /// network; on failure the collection stays empty.
    pub async fn load<F>(
        &mut self,
        source: &CatalogSource,
        timeout: Duration,
        on_progress: F,
    ) -> Result<usize, LoadFailure>
    where
        F: FnMut(u64, Option<u64>),
    {
        if self.status != LoadStatus::NotLoaded {
            return Err(LoadFailure::AlreadyAttempted);
        }
        let result = fetch_catalog(source, timeout, on_progress)
            .await
            .and_then(|bytes| parse_catalog(&bytes));
        self.finish(result)
    }

    /// Install a catalog from an already-retrieved document.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize, LoadFailure> {
        if self.status != LoadStatus::NotLoaded {
            return Err(LoadFailure::AlreadyAttempted);
        }
        self.finish(parse_catalog(bytes))
    }

    /// Record a load that could not even be attempted, e.g. a bad source.
    pub fn fail(&mut self, failure: LoadFailure) {
        if self.status == LoadStatus::NotLoaded {
            let _ = self.finish(Err(failure));
        }
    }

    fn finish(&mut self, result: Result<Vec<Game>, LoadFailure>) -> Result<usize, LoadFailure> {
        match result {
            Ok(games) => {
                self.install(games);
                log::info!("catalog loaded: {} games", self.games.len());
                Ok(self.games.len())
            }
            Err(e) => {
                log::error!("catalog load failed: {}", e);
                self.status = LoadStatus::Failed(e.user_message());
                Err(e)
            }
        }
    }

    fn install(&mut self, mut games: Vec<Game>) {
        sort_by_release_desc(&mut games);

        self.by_slug.clear();
        self.by_title.clear();
        for (i, g) in games.iter().enumerate() {
            // duplicate slugs: the later record wins
            self.by_slug.insert(g.slug.clone(), i);
            // duplicate titles: the first record in display order wins
            self.by_title.entry(g.title.to_lowercase()).or_insert(i);
        }
        self.games = games;
        self.status = LoadStatus::Loaded;
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Every game, newest release first.
    pub fn all(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Game> {
        self.by_slug.get(slug).map(|&i| &self.games[i])
    }

    /// Case-insensitive exact title match.
    pub fn find_by_title(&self, title: &str) -> Option<&Game> {
        self.by_title
            .get(&title.to_lowercase())
            .map(|&i| &self.games[i])
    }

    /// Games for a curated title list, in list order; unknown titles are skipped.
    pub fn select_titles<S: AsRef<str>>(&self, titles: &[S]) -> Vec<&Game> {
        titles
            .iter()
            .filter_map(|t| {
                let found = self.find_by_title(t.as_ref());
                if found.is_none() {
                    log::debug!("featured title not in catalog: {}", t.as_ref());
                }
                found
            })
            .collect()
    }

    /// Distinct genres in display order.
    pub fn genres(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for g in &self.games {
            if !out.contains(&g.genre.as_str()) {
                out.push(&g.genre);
            }
        }
        out
    }
}

/// Decode a catalog document. Records missing a required field are skipped.
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<Game>, LoadFailure> {
    let doc: serde_json::Value = serde_json::from_slice(bytes)?;
    let serde_json::Value::Array(records) = doc else {
        return Err(LoadFailure::NotAnArray);
    };

    let mut games = Vec::with_capacity(records.len());
    for (i, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Game>(record) {
            Ok(g) => games.push(g),
            Err(e) => log::warn!("skipping catalog record #{}: {}", i, e),
        }
    }
    Ok(games)
}

/// Newest first. `YYYY-MM-DD` strings order correctly under byte comparison;
/// the sort is stable so equal dates keep their relative order.
pub fn sort_by_release_desc(games: &mut [Game]) {
    games.sort_by(|a, b| b.release_date.cmp(&a.release_date));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    pub(crate) fn game(slug: &str, title: &str, genre: &str, rating: f64, date: &str) -> Game {
        Game {
            slug: slug.to_string(),
            title: title.to_string(),
            genre: genre.to_string(),
            publisher: "Publisher".to_string(),
            release_date: date.to_string(),
            rating,
            cover: format!("assets/{slug}.jpg"),
            summary: Some(format!("{title} summary")),
            details: None,
            platforms: vec!["PC".to_string(), "Switch".to_string()],
        }
    }

    /// The two-game catalog used across the component tests.
    pub(crate) fn sample_store() -> CatalogStore {
        CatalogStore::from_games(vec![
            game("a", "Stardew Valley", "Sim", 9.0, "2016-02-26"),
            game("b", "Judgment", "Action", 8.0, "2018-12-13"),
        ])
    }

    #[test]
    fn test_fail_records_reason_once() {
        let mut store = CatalogStore::new();
        store.fail(LoadFailure::InvalidUrl("http://[".to_string()));
        assert!(store.failure().is_some());
        assert!(store.is_empty());
        assert!(matches!(store.load_bytes(b"[]"), Err(LoadFailure::AlreadyAttempted)));

        let mut loaded = sample_store();
        loaded.fail(LoadFailure::InvalidUrl("x".to_string()));
        assert_eq!(loaded.status(), &LoadStatus::Loaded);
    }

    #[test]
    fn test_sorted_newest_first() {
        let store = sample_store();
        let titles: Vec<&str> = store.all().iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["Judgment", "Stardew Valley"]);
    }

    #[test]
    fn test_find_by_slug() {
        let store = sample_store();
        assert_eq!(store.find_by_slug("a").unwrap().title, "Stardew Valley");
        assert_eq!(store.find_by_slug("b").unwrap().title, "Judgment");
        assert!(store.find_by_slug("zzz").is_none());
        assert!(store.find_by_slug("").is_none());
    }

    #[test]
    fn test_duplicate_slug_later_wins() {
        let store = CatalogStore::from_games(vec![
            game("dup", "First", "RPG", 7.0, "2020-01-01"),
            game("dup", "Second", "RPG", 7.0, "2019-01-01"),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.find_by_slug("dup").unwrap().title, "Second");
    }

    #[test]
    fn test_select_titles_skips_missing() {
        let store = sample_store();
        let picked = store.select_titles(&["Path of Exile", "judgment", "STARDEW VALLEY"]);
        let slugs: Vec<&str> = picked.iter().map(|g| g.slug.as_str()).collect();
        assert_eq!(slugs, ["b", "a"]);
    }

    #[test]
    fn test_genres_distinct() {
        let store = CatalogStore::from_games(vec![
            game("a", "A", "RPG", 7.0, "2020-01-03"),
            game("b", "B", "Sim", 7.0, "2020-01-02"),
            game("c", "C", "RPG", 7.0, "2020-01-01"),
        ]);
        assert_eq!(store.genres(), ["RPG", "Sim"]);
    }

    #[test]
    fn test_parse_skips_incomplete_records() {
        let json = br#"[
            {"slug":"a","title":"A","genre":"Sim","publisher":"P","release_date":"2016-02-26","rating":9,"cover":"a.jpg"},
            {"slug":"broken","genre":"Sim"}
        ]"#;
        let games = parse_catalog(json).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].slug, "a");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(parse_catalog(br#"{"games":[]}"#), Err(LoadFailure::NotAnArray)));
        assert!(matches!(parse_catalog(b"not json"), Err(LoadFailure::Parse(_))));
    }

    #[test]
    fn test_load_bytes_only_once() {
        let mut store = CatalogStore::new();
        assert_eq!(store.status(), &LoadStatus::NotLoaded);
        assert_eq!(store.load_bytes(b"[]").unwrap(), 0);
        assert_eq!(store.status(), &LoadStatus::Loaded);
        assert!(matches!(store.load_bytes(b"[]"), Err(LoadFailure::AlreadyAttempted)));
    }

    #[test]
    fn test_failed_parse_leaves_store_empty() {
        let mut store = CatalogStore::new();
        assert!(store.load_bytes(b"{oops").is_err());
        assert!(store.is_empty());
        assert!(store.failure().is_some());
    }

    /// Serve one canned HTTP response on a local port.
    async fn serve_once(response: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_load_non_success_status_leaves_store_empty() {
        let base = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let source = CatalogSource::resolve(&base, "data/games.json").unwrap();

        let mut store = CatalogStore::new();
        let err = store
            .load(&source, Duration::from_secs(5), |_, _| {})
            .await
            .unwrap_err();

        assert!(matches!(err, LoadFailure::Status { status: 404, .. }));
        assert!(store.is_empty());
        assert!(matches!(store.status(), LoadStatus::Failed(_)));
    }

    #[tokio::test]
    async fn test_load_with_oversized_content_length_fails() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 9000000000000000000\r\nConnection: close\r\n\r\n[]",
        )
        .await;
        let source = CatalogSource::resolve(&base, "data/games.json").unwrap();

        let mut store = CatalogStore::new();
        let err = store
            .load(&source, Duration::from_secs(5), |_, _| {})
            .await
            .unwrap_err();

        assert!(matches!(err, LoadFailure::Network(_)));
        assert!(store.is_empty());
        assert!(store.failure().is_some());
    }

    #[tokio::test]
    async fn test_load_over_http() {
        let base = serve_once(concat!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 101\r\nConnection: close\r\n\r\n",
            r#"[{"slug":"a","title":"A","genre":"Sim","publisher":"P","release_date":"2016","rating":9,"cover":"c"}]"#
        ))
        .await;
        let source = CatalogSource::resolve(&base, "data/games.json").unwrap();

        let mut store = CatalogStore::new();
        let n = store
            .load(&source, Duration::from_secs(5), |_, _| {})
            .await
            .unwrap();
        assert_eq!(n, 1);
        assert_eq!(store.find_by_slug("a").unwrap().title, "A");

        // a second request is refused without touching the network
        let again = store.load(&source, Duration::from_secs(5), |_, _| {}).await;
        assert!(matches!(again, Err(LoadFailure::AlreadyAttempted)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            dir.path().join("data/games.json"),
            r#"[{"slug":"a","title":"A","genre":"Sim","publisher":"P","release_date":"2016-02-26","rating":9,"cover":"c"},
                {"slug":"b","title":"B","genre":"RPG","publisher":"P","release_date":"2019-05-01","rating":6,"cover":"c"}]"#,
        )
        .unwrap();
        let base = dir.path().to_string_lossy().to_string();
        let source = CatalogSource::resolve(&base, "data/games.json").unwrap();

        let mut store = CatalogStore::new();
        store.load(&source, Duration::from_secs(1), |_, _| {}).await.unwrap();
        assert_eq!(store.all()[0].slug, "b");
    }

    proptest! {
        #[test]
        fn prop_sort_is_idempotent(dates in proptest::collection::vec("20[0-2][0-9]-[01][0-9]-[0-3][0-9]", 0..30)) {
            let mut games: Vec<Game> = dates
                .iter()
                .enumerate()
                .map(|(i, d)| game(&format!("g{i}"), &format!("G{i}"), "RPG", 7.0, d))
                .collect();
            sort_by_release_desc(&mut games);
            let once = games.clone();
            sort_by_release_desc(&mut games);
            prop_assert_eq!(&once, &games);
            for pair in games.windows(2) {
                prop_assert!(pair[0].release_date >= pair[1].release_date);
            }
        }
    }
}
