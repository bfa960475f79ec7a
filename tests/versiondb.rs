//! End-to-end load and lookup tests against a mock Go source tree

mod helper;

use tempfile::TempDir;

use gosince::lookup::{Lookup, Query, resolve};
use gosince::versiondb::{
    ApiSource, CachedSource, FetchError, GrammarError, LoadError, QueryError, SymbolInfo,
    VersionDb, VersionTag,
};
use helper::{ApiServer, GO1, GO1_1, GO1_2};

fn info(since: u32, deprecated: Option<u32>) -> SymbolInfo {
    SymbolInfo {
        since: VersionTag::minor(since),
        deprecated: deprecated.map(VersionTag::minor),
    }
}

#[tokio::test]
async fn load_downloads_every_release_until_end_of_series() {
    let cache_dir = TempDir::new().unwrap();
    let api = ApiServer::serving(&[GO1, GO1_1, GO1_2]).await;

    let db = VersionDb::load(&api.source(&cache_dir)).await.unwrap();

    api.assert_all().await;
    assert_eq!(db.since("net/http", ""), Ok(info(0, None)));
    assert_eq!(db.since("net/http", "get"), Ok(info(0, None)));
    assert_eq!(db.since("net/http", "client.get"), Ok(info(1, None)));
    assert_eq!(db.since("net/http", "server.addr"), Ok(info(0, None)));
    assert_eq!(db.since("io", "reader.read"), Ok(info(0, None)));
    assert_eq!(db.since("syscall", "af_inet"), Ok(info(0, None)));
    assert_eq!(db.since("reflect", "sliceheader"), Ok(info(0, Some(2))));
    assert_eq!(db.since("context", "background"), Ok(info(2, None)));
    assert_eq!(
        db.since("context", "todo"),
        Err(QueryError::UnknownSymbol {
            package: "context".to_string(),
            symbol: "todo".to_string(),
        })
    );

    for file in ["go1.txt", "go1.1.txt", "go1.2.txt"] {
        assert!(cache_dir.path().join(file).exists(), "{file} not cached");
    }
    assert!(!cache_dir.path().join("go1.3.txt").exists());
}

#[tokio::test]
async fn load_reuses_cached_files() {
    let cache_dir = TempDir::new().unwrap();
    let api = ApiServer::serving(&[GO1, GO1_1]).await;
    let source = api.source(&cache_dir);

    let first = VersionDb::load(&source).await.unwrap();
    let second = VersionDb::load(&source).await.unwrap();

    // release files are downloaded once, only the end marker is probed again
    api.assert_all().await;
    assert_eq!(first, second);
    assert_eq!(
        source.fetch(VersionTag::BASE).await.unwrap(),
        GO1.as_bytes()
    );
}

#[tokio::test]
async fn load_fails_when_go1_is_missing() {
    let cache_dir = TempDir::new().unwrap();
    let api = ApiServer::serving(&[]).await;

    let result = VersionDb::load(&api.source(&cache_dir)).await;

    assert!(matches!(result, Err(LoadError::MissingBaseVersion)));
}

#[tokio::test]
async fn load_aborts_when_cache_is_not_writable() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let api = ApiServer::serving(&[GO1]).await;

    let source = CachedSource::new(blocker.join("cache"), &api.server.url()).unwrap();
    let result = VersionDb::load(&source).await;

    assert!(matches!(
        result,
        Err(LoadError::Fetch {
            version,
            source: FetchError::Io { .. },
        }) if version == VersionTag::BASE
    ));
}

#[tokio::test]
async fn load_aborts_on_line_without_comma() {
    let cache_dir = TempDir::new().unwrap();
    let api = ApiServer::serving(&[GO1, "pkg io var EOF error\n"]).await;

    let result = VersionDb::load(&api.source(&cache_dir)).await;

    assert!(matches!(
        result,
        Err(LoadError::Grammar {
            line: 1,
            source: GrammarError::MissingFieldSeparator,
            ..
        })
    ));
}

#[tokio::test]
async fn lookup_falls_back_to_search_across_packages() {
    let cache_dir = TempDir::new().unwrap();
    let api = ApiServer::serving(&[GO1, GO1_1, GO1_2]).await;
    let db = VersionDb::load(&api.source(&cache_dir)).await.unwrap();

    let Lookup::Matches(hits) = resolve(&db, &Query::parse("Get", None)) else {
        panic!("expected several matches");
    };
    let found: Vec<(&str, SymbolInfo)> = hits
        .iter()
        .map(|hit| (hit.name.as_str(), hit.info))
        .collect();
    assert_eq!(
        found,
        vec![
            ("net/http Get", info(0, None)),
            ("net/http Client.Get", info(1, None)),
            ("net/url Values.Get", info(1, None)),
        ]
    );

    assert_eq!(
        resolve(&db, &Query::parse("net/http.Client.Get", None)),
        Lookup::Exact(info(1, None))
    );
    assert!(matches!(
        resolve(&db, &Query::parse("nothing", None)),
        Lookup::NotFound(QueryError::UnknownPackage(_))
    ));
}
