use std::path::{Path, PathBuf};

use {
    anyhow::{Context, Result},
    clap::Args,
    formpost_config::FormpostConfig,
    formpost_multipart::{EncodedForm, MultipartEncoder, sanitize::basename, sanitize_filename},
    tokio::io::AsyncWriteExt,
    tracing::info,
};

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// File to encode.
    pub path: PathBuf,

    /// Form field name (overrides config, default `file`).
    #[arg(long)]
    pub field: Option<String>,

    /// Fixed boundary token (overrides config, default random).
    #[arg(long)]
    pub boundary: Option<String>,

    /// Write the body here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the Content-Type and Content-Length headers to stderr.
    #[arg(long, default_value_t = false)]
    pub print_header: bool,
}

/// Build the encoder from config, with a CLI boundary taking precedence.
pub fn build_encoder(config: &FormpostConfig, boundary: Option<&str>) -> Result<MultipartEncoder> {
    let mut config = config.clone();
    if let Some(boundary) = boundary {
        config.boundary = Some(boundary.to_string());
    }
    config.build_encoder().context("building encoder from config")
}

pub async fn encode_file(
    config: &FormpostConfig,
    path: &Path,
    field: Option<&str>,
    boundary: Option<&str>,
) -> Result<EncodedForm> {
    let encoder = build_encoder(config, boundary)?;
    let field = field.or(config.field_name.as_deref());
    Ok(encoder.encode_part_from_path(path, field).await?)
}

pub async fn handle_encode(config: &FormpostConfig, args: EncodeArgs) -> Result<()> {
    let form = encode_file(
        config,
        &args.path,
        args.field.as_deref(),
        args.boundary.as_deref(),
    )
    .await?;

    info!(
        path = %args.path.display(),
        content_type = %form.content_type,
        content_length = form.content_length(),
        "encoded file"
    );
    if args.print_header {
        eprintln!("Content-Type: {}", form.content_type);
        eprintln!("Content-Length: {}", form.content_length());
    }

    match &args.output {
        Some(out) => tokio::fs::write(out, &form.body)
            .await
            .with_context(|| format!("writing {}", out.display()))?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&form.body).await?;
            stdout.flush().await?;
        },
    }
    Ok(())
}

pub fn handle_content_type(config: &FormpostConfig, paths: &[String]) -> Result<()> {
    let encoder = build_encoder(config, None)?;
    for path in paths {
        println!("{path}\t{}", encoder.content_type(path));
    }
    Ok(())
}

pub fn sanitized_name(name: &str) -> String {
    sanitize_filename(basename(name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn cli_boundary_overrides_config() {
        let config = FormpostConfig {
            boundary: Some("----FromConfig".into()),
            ..Default::default()
        };
        assert_eq!(build_encoder(&config, None).unwrap().boundary(), "----FromConfig");
        assert_eq!(
            build_encoder(&config, Some("----FromCli")).unwrap().boundary(),
            "----FromCli"
        );
    }

    #[test]
    fn invalid_cli_boundary_is_an_error() {
        let err = build_encoder(&FormpostConfig::default(), Some("no spaces")).unwrap_err();
        assert!(format!("{err:#}").contains("invalid multipart boundary"));
    }

    #[test]
    fn sanitized_name_strips_directories() {
        assert_eq!(sanitized_name("/tmp/x/a:b.pdf"), "a_b.pdf");
    }

    #[tokio::test]
    async fn encode_file_uses_config_field_and_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.tiff");
        std::fs::write(&path, b"II*\0").unwrap();

        let config = FormpostConfig {
            boundary: Some("----Fixed123".into()),
            field_name: Some("document".into()),
            content_types: [(".tiff".to_string(), "image/tiff".to_string())].into(),
        };
        let form = encode_file(&config, &path, None, None).await.unwrap();
        let expected = "------Fixed123\r\n\
                        Content-Disposition: form-data; name=\"document\"; filename=\"scan.tiff\"\r\n\
                        Content-Type: image/tiff\r\n\
                        \r\n\
                        II*\0\
                        \r\n------Fixed123--\r\n";
        assert_eq!(form.body, expected.as_bytes());
        assert_eq!(form.content_type, "multipart/form-data; boundary=----Fixed123");

        let form = encode_file(&config, &path, Some("scan"), None).await.unwrap();
        assert!(String::from_utf8_lossy(&form.body).contains("name=\"scan\";"));
    }

    #[tokio::test]
    async fn encode_file_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = encode_file(&FormpostConfig::default(), &dir.path().join("gone.pdf"), None, None)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("gone.pdf"));
    }
}
