//! Api file server test utilities

use mockito::{Mock, Server, ServerGuard};
use tempfile::TempDir;

use gosince::versiondb::CachedSource;

pub const GO1: &str = "\
# API checker for go1
pkg io, type Reader interface { Read }
pkg io, type Reader interface, Read([]uint8) (int, error)
pkg net/http, func Get(string) (*Response, error)
pkg net/http, type Server struct, Addr string
pkg reflect, type SliceHeader struct
pkg reflect, type SliceHeader struct, Data uintptr
pkg syscall (darwin-386), const AF_INET = 2
";

pub const GO1_1: &str = "\
pkg net/http, method (*Client) Get(string) (*Response, error)
pkg net/http, func Get(string) (*Response, error)
pkg net/url, method (Values) Get(string) string
";

pub const GO1_2: &str = "\
pkg context, func Background() Context
pkg reflect, type SliceHeader //deprecated
pkg reflect, type SliceHeader //deprecated
";

/// Mock Go source tree serving `api/go1*.txt`
pub struct ApiServer {
    pub server: ServerGuard,
    pub mocks: Vec<Mock>,
}

impl ApiServer {
    /// Serves `files` as go1, go1.1, ... followed by the not found marker.
    pub async fn serving(files: &[&str]) -> Self {
        let mut server = Server::new_async().await;
        let mut mocks = Vec::new();

        for (minor, body) in files.iter().enumerate() {
            mocks.push(
                server
                    .mock("GET", file_path(minor).as_str())
                    .with_status(200)
                    .with_body(*body)
                    .expect(1)
                    .create_async()
                    .await,
            );
        }

        mocks.push(
            server
                .mock("GET", file_path(files.len()).as_str())
                .with_status(404)
                .with_body("404: Not Found")
                .expect_at_least(1)
                .create_async()
                .await,
        );

        Self { server, mocks }
    }

    pub fn source(&self, cache_dir: &TempDir) -> CachedSource {
        CachedSource::new(cache_dir.path(), &self.server.url()).unwrap()
    }

    pub async fn assert_all(&self) {
        for mock in &self.mocks {
            mock.assert_async().await;
        }
    }
}

fn file_path(minor: usize) -> String {
    if minor == 0 {
        "/api/go1.txt".to_string()
    } else {
        format!("/api/go1.{}.txt", minor)
    }
}
