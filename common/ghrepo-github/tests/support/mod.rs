//! Shared test doubles: an in-memory `RepositoryApi` and a canned HTTP server
#![allow(dead_code)]

use async_trait::async_trait;
use ghrepo_github::{
    ArchiveFormat, Commit, FileDeleteOptions, GitObject, NewCommit, NewTreeEntry, Reference,
    RepositoryApi, RepositoryContent, RepositoryError, Result, Tree, TreeEntry,
};
use ghrepo_github::types::{CommitParent, CommitTree};
use reqwest::StatusCode;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

/// A call received by [`FakeApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetRef(String),
    GetTree {
        sha: String,
        recursive: bool,
    },
    CreateTree {
        base_tree: String,
        entries: Vec<NewTreeEntry>,
    },
    CreateCommit(NewCommit),
    UpdateRef {
        reference: String,
        sha: String,
        force: bool,
    },
    GetContents {
        path: String,
        reference: String,
    },
    Download {
        path: String,
        reference: String,
    },
    DeleteFile {
        path: String,
        options: FileDeleteOptions,
    },
    ArchiveLink {
        format: ArchiveFormat,
        reference: String,
        max_redirects: u8,
    },
}

/// In-memory repository with one branch
///
/// `files` maps a path to (blob sha, content). Paths in `forbidden` answer
/// 403; other unknown paths answer 404.
#[derive(Default)]
pub struct FakeApi {
    pub branch: String,
    pub tip: String,
    pub base_entries: Vec<TreeEntry>,
    pub files: HashMap<String, (String, Vec<u8>)>,
    pub forbidden: HashSet<String>,
    pub archive_link: Option<Url>,
    pub fail_create_commit: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new(branch: &str, tip: &str) -> Self {
        Self {
            branch: branch.to_string(),
            tip: tip.to_string(),
            ..Default::default()
        }
    }

    pub fn with_base_entry(mut self, path: &str, sha: &str) -> Self {
        self.base_entries.push(TreeEntry {
            path: path.to_string(),
            mode: "100644".to_string(),
            kind: "blob".to_string(),
            sha: Some(sha.to_string()),
            size: Some(10),
        });
        self
    }

    pub fn with_file(mut self, path: &str, sha: &str, content: &[u8]) -> Self {
        self.files
            .insert(path.to_string(), (sha.to_string(), content.to_vec()));
        self
    }

    pub fn with_forbidden(mut self, path: &str) -> Self {
        self.forbidden.insert(path.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn lookup(&self, path: &str) -> Result<&(String, Vec<u8>)> {
        if self.forbidden.contains(path) {
            return Err(RepositoryError::Api {
                status: StatusCode::FORBIDDEN,
                message: "Resource not accessible by integration".to_string(),
            });
        }
        self.files.get(path).ok_or_else(|| RepositoryError::NotFound {
            resource: path.to_string(),
        })
    }
}

#[async_trait]
impl RepositoryApi for FakeApi {
    async fn get_ref(&self, _owner: &str, _repo: &str, reference: &str) -> Result<Reference> {
        self.record(Call::GetRef(reference.to_string()));
        if reference != format!("refs/heads/{}", self.branch) {
            return Err(RepositoryError::NotFound {
                resource: reference.to_string(),
            });
        }
        Ok(Reference {
            name: reference.to_string(),
            object: GitObject {
                sha: self.tip.clone(),
                kind: "commit".to_string(),
            },
        })
    }

    async fn update_ref(
        &self,
        _owner: &str,
        _repo: &str,
        reference: &str,
        sha: &str,
        force: bool,
    ) -> Result<Reference> {
        self.record(Call::UpdateRef {
            reference: reference.to_string(),
            sha: sha.to_string(),
            force,
        });
        Ok(Reference {
            name: reference.to_string(),
            object: GitObject {
                sha: sha.to_string(),
                kind: "commit".to_string(),
            },
        })
    }

    async fn get_tree(
        &self,
        _owner: &str,
        _repo: &str,
        sha: &str,
        recursive: bool,
    ) -> Result<Tree> {
        self.record(Call::GetTree {
            sha: sha.to_string(),
            recursive,
        });
        Ok(Tree {
            sha: format!("tree-of-{sha}"),
            entries: self.base_entries.clone(),
            truncated: false,
        })
    }

    async fn create_tree(
        &self,
        _owner: &str,
        _repo: &str,
        base_tree: &str,
        entries: &[NewTreeEntry],
    ) -> Result<Tree> {
        self.record(Call::CreateTree {
            base_tree: base_tree.to_string(),
            entries: entries.to_vec(),
        });
        Ok(Tree {
            sha: "new-tree".to_string(),
            entries: Vec::new(),
            truncated: false,
        })
    }

    async fn create_commit(&self, _owner: &str, _repo: &str, commit: &NewCommit) -> Result<Commit> {
        self.record(Call::CreateCommit(commit.clone()));
        if self.fail_create_commit {
            return Err(RepositoryError::Api {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: "Tree SHA does not exist".to_string(),
            });
        }
        Ok(Commit {
            sha: "new-commit".to_string(),
            tree: CommitTree {
                sha: commit.tree.clone(),
            },
            message: Some(commit.message.clone()),
            parents: commit
                .parents
                .iter()
                .map(|sha| CommitParent { sha: sha.clone() })
                .collect(),
        })
    }

    async fn get_contents(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<RepositoryContent> {
        self.record(Call::GetContents {
            path: path.to_string(),
            reference: reference.to_string(),
        });
        let (sha, content) = self.lookup(path)?;
        Ok(RepositoryContent {
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            sha: sha.clone(),
            kind: "file".to_string(),
            size: Some(content.len() as u64),
            download_url: None,
        })
    }

    async fn download_contents(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Vec<u8>> {
        self.record(Call::Download {
            path: path.to_string(),
            reference: reference.to_string(),
        });
        Ok(self.lookup(path)?.1.clone())
    }

    async fn delete_file(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
        options: &FileDeleteOptions,
    ) -> Result<()> {
        self.record(Call::DeleteFile {
            path: path.to_string(),
            options: options.clone(),
        });
        self.lookup(path).map(|_| ())
    }

    async fn get_archive_link(
        &self,
        _owner: &str,
        _repo: &str,
        format: ArchiveFormat,
        reference: &str,
        max_redirects: u8,
    ) -> Result<Url> {
        self.record(Call::ArchiveLink {
            format,
            reference: reference.to_string(),
            max_redirects,
        });
        self.archive_link.clone().ok_or_else(|| RepositoryError::NotFound {
            resource: format!("{format} {reference}"),
        })
    }
}

/// A response the test server sends back
#[derive(Clone)]
pub struct Canned {
    pub status: u16,
    pub reason: &'static str,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Canned {
    pub fn json(status: u16, reason: &'static str, body: serde_json::Value) -> Self {
        Self {
            status,
            reason,
            headers: vec![("Content-Type", "application/json".to_string())],
            body: body.to_string().into_bytes(),
        }
    }

    pub fn bytes(status: u16, reason: &'static str, body: &[u8]) -> Self {
        Self {
            status,
            reason,
            headers: Vec::new(),
            body: body.to_vec(),
        }
    }

    pub fn redirect(status: u16, reason: &'static str, location: &str) -> Self {
        Self {
            status,
            reason,
            headers: vec![("Location", location.to_string())],
            body: Vec::new(),
        }
    }
}

/// A request the test server received
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    /// Path plus query string
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

/// A local HTTP/1.1 server answering one canned response per connection
pub struct TestServer {
    pub base: Url,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl TestServer {
    pub async fn start(responses: Vec<Canned>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            for canned in responses {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut stream).await;
                recorded.lock().unwrap().push(request);
                write_response(&mut stream, &canned).await;
            }
        });

        Self { base, requests }
    }

    pub fn url(&self, path: &str) -> Url {
        self.base.join(path).unwrap()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

async fn read_request(stream: &mut TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(end) = find_header_end(&buf) {
            break end;
        }
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request headers");
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split(' ');
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default().to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request body");
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string();

    Recorded {
        method,
        target,
        headers,
        body,
    }
}

async fn write_response(stream: &mut TcpStream, canned: &Canned) {
    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        canned.status,
        canned.reason,
        canned.body.len()
    );
    for (name, value) in &canned.headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str("\r\n");

    // The client may hang up early on redirects and errors
    let _ = stream.write_all(head.as_bytes()).await;
    let _ = stream.write_all(&canned.body).await;
    let _ = stream.shutdown().await;
}
