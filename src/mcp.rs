use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::assemble::{ArtifactKind, OutputArtifact};
use crate::commands::{open_session, write_artifact};
use crate::config::{OperationConfig, OutputNaming};
use crate::page_range::{PageSet, ParsePolicy};
use crate::pdf::PdfDocument;
use crate::progress::NoProgress;
use crate::selection::{select_for_extract, select_for_remove, EmptySelectionPolicy};
use crate::session::{run_operation, Session};
use crate::status::Status;

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParsePagesRequest {
    #[schemars(description = "Page ranges (e.g., '1-3,5,8-8')")]
    pub pages: String,
    #[schemars(description = "Page count of the document the ranges apply to")]
    pub total_pages: u32,
    #[schemars(description = "Reject malformed tokens instead of skipping them (default: false)")]
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfExtractRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Page ranges (e.g., '1-3,5,8-8')")]
    #[serde(default)]
    pub pages: String,
    #[schemars(description = "Export every page when pages is blank (default: false)")]
    #[serde(default)]
    pub all_if_empty: bool,
    #[schemars(description = "Output file path (default: generated name next to the source)")]
    pub output: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfRemoveRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Page ranges to remove (e.g., '2,4-6')")]
    pub pages: String,
    #[schemars(description = "Output file path (default: generated name next to the source)")]
    pub output: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitAllRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Output ZIP path (default: split_pages.zip next to the source)")]
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    config: OperationConfig,
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new(config: OperationConfig) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new(OperationConfig::default())
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get PDF metadata including page count, version, size, title and author")]
    fn pdf_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match PdfDocument::open(&path) {
            Ok(doc) => {
                let info = doc.get_info();
                let result = PdfInfoResult {
                    path,
                    large_file: self.config.exceeds_size_advisory(info.size_bytes),
                    page_count: info.page_count,
                    version: info.version,
                    size_bytes: info.size_bytes,
                    title: info.title,
                    author: info.author,
                    creator: info.creator,
                    producer: info.producer,
                    subject: info.subject,
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e.user_message()),
        }
    }

    #[tool(description = "Resolve a page range expression against a page count and show the pages extract and remove would keep")]
    fn parse_pages(&self, Parameters(req): Parameters<ParsePagesRequest>) -> String {
        let policy = if req.strict {
            ParsePolicy::STRICT
        } else {
            self.config.parse_policy
        };
        let set = match PageSet::parse(&req.pages, req.total_pages, policy) {
            Ok(s) => s,
            Err(e) => return format!("Error: {}", e.user_message()),
        };

        let result = ParsePagesResult {
            pages: set.to_vec(),
            extract_indices: select_for_extract(&set, EmptySelectionPolicy::Reject)
                .ok()
                .map(|i| i.as_slice().to_vec()),
            remove_keeps_indices: select_for_remove(&set, req.total_pages)
                .ok()
                .map(|i| i.as_slice().to_vec()),
        };
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }

    #[tool(description = "Extract pages from a PDF into a new file. Page range syntax: '1-3,5,8-8'.")]
    fn pdf_extract(&self, Parameters(req): Parameters<PdfExtractRequest>) -> String {
        let config = OperationConfig {
            empty_selection: if req.all_if_empty {
                EmptySelectionPolicy::SelectAll
            } else {
                EmptySelectionPolicy::Reject
            },
            ..self.config
        };
        self.produce(&req.path, req.output.as_deref(), &config, |session| {
            run_operation("extract", || session.extract(&req.pages, &config))
        })
    }

    #[tool(description = "Write a copy of a PDF without the given pages")]
    fn pdf_remove(&self, Parameters(req): Parameters<PdfRemoveRequest>) -> String {
        let config = self.config;
        self.produce(&req.path, req.output.as_deref(), &config, |session| {
            run_operation("remove", || session.remove(&req.pages, &config))
        })
    }

    #[tool(description = "Split every page of a PDF into its own file, bundled into a ZIP archive with page_NNN.pdf entries")]
    fn pdf_split_all(&self, Parameters(req): Parameters<PdfSplitAllRequest>) -> String {
        let config = self.config;
        self.produce(&req.path, req.output.as_deref(), &config, |session| {
            run_operation("split-all", || session.split_all(&mut NoProgress))
        })
    }
}

impl PdfServer {
    fn produce<F>(&self, path: &str, output: Option<&str>, config: &OperationConfig, op: F) -> String
    where
        F: FnOnce(&Session) -> std::result::Result<OutputArtifact, Status>,
    {
        let input = Path::new(path);
        let session = match open_session(input, config) {
            Ok(s) => s,
            Err(e) => return format!("Error: {}", e),
        };

        let artifact = match op(&session) {
            Ok(a) => a,
            Err(status) => return format!("Error: {}", status),
        };

        match write_artifact(&artifact, input, output.map(Path::new)) {
            Ok(written) => {
                let result = ArtifactResult {
                    output_path: written.display().to_string(),
                    kind: artifact.kind,
                    page_count: artifact.pages,
                    size_bytes: artifact.bytes.len(),
                    naming: config.naming,
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct PdfInfoResult {
    pub path: String,
    pub page_count: u32,
    pub version: String,
    pub size_bytes: usize,
    pub large_file: bool,
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub subject: Option<String>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct ParsePagesResult {
    pub pages: Vec<u32>,
    pub extract_indices: Option<Vec<u32>>,
    pub remove_keeps_indices: Option<Vec<u32>>,
}

#[derive(Debug, Serialize)]
pub struct ArtifactResult {
    pub output_path: String,
    pub kind: ArtifactKind,
    pub page_count: usize,
    pub size_bytes: usize,
    pub naming: OutputNaming,
}

#[tool_handler]
impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Local PDF page tools. Use pdf_info for document metadata, parse_pages to check \
                 how a page range resolves, pdf_extract to copy selected pages into a new PDF, \
                 pdf_remove to drop pages, and pdf_split_all to get one PDF per page in a ZIP."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server(config: OperationConfig) -> Result<()> {
    tracing::info!("starting MCP server on stdio");
    let server = PdfServer::new(config);

    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
