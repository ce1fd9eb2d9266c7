use crate::io::{self, IoError};
use crate::render::render;
use crate::template::{Page, PageTemplate, TemplateError};
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Error reading file")]
    Input(#[source] IoError),
    #[error("Error loading HTML template")]
    Template(#[source] TemplateError),
    #[error("Error creating output file")]
    Output(#[source] IoError),
    #[error("Error rendering HTML")]
    Render(#[source] TemplateError),
}

/// One Markdown file to turn into one HTML page.
#[derive(Debug, Clone)]
pub struct ConvertJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub template: PathBuf,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub markdown_bytes: usize,
    pub html_bytes: usize,
}

/// Reads, renders and writes the page described by `job`.
///
/// The template is loaded before the output file is created, so a missing
/// or malformed template never leaves an output file behind. A failure while
/// writing the page may leave a partial file.
pub fn convert(job: &ConvertJob) -> Result<ConvertReport, ConvertError> {
    let markdown = io::read_markdown(&job.input).map_err(ConvertError::Input)?;
    let body = render(&markdown);
    log::debug!(
        "Rendered {} ({} bytes) into {} bytes of HTML",
        job.input.display(),
        markdown.len(),
        body.len()
    );

    let template = PageTemplate::load(&job.template).map_err(ConvertError::Template)?;

    let file = io::create_output(&job.output).map_err(ConvertError::Output)?;
    let html_bytes = template
        .execute(
            BufWriter::new(file),
            &Page {
                title: &job.title,
                body: &body,
            },
        )
        .map_err(ConvertError::Render)?;
    log::debug!("Wrote {} bytes to {}", html_bytes, job.output.display());

    Ok(ConvertReport {
        input: job.input.clone(),
        output: job.output.clone(),
        markdown_bytes: markdown.len(),
        html_bytes,
    })
}
