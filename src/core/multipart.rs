//! multipart/form-data body model and encoder.
//!
//! The builder only produces `MultipartPayload`; bytes are produced on demand
//! by `encode`, which pulls the image contents through a caller supplied reader.

use crate::errors::AppResult;
use bytes::{BufMut, Bytes, BytesMut};

const CRLF: &[u8] = b"\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        uri: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    parts: Vec<Part>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.parts.push(Part::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        &mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        uri: impl Into<String>,
    ) -> &mut Self {
        self.parts.push(Part::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            uri: uri.into(),
        });
        self
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// First text value stored under `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            Part::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// All text values stored under `name`, in insertion order.
    pub fn text_values(&self, name: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text { name: n, value } if n == name => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn file_part(&self) -> Option<&Part> {
        self.parts.iter().find(|p| matches!(p, Part::File { .. }))
    }

    pub fn content_type(boundary: &str) -> String {
        format!("multipart/form-data; boundary={}", boundary)
    }

    /// Encode with a fresh random boundary. Returns `(content type, body)`.
    pub fn encode_fresh<F>(&self, read_file: F) -> AppResult<(String, Bytes)>
    where
        F: FnMut(&str) -> AppResult<Vec<u8>>,
    {
        let boundary = generate_boundary();
        let body = self.encode(&boundary, read_file)?;
        Ok((Self::content_type(&boundary), body))
    }

    /// Encode the body. `read_file` turns a file part's URI into its bytes.
    pub fn encode<F>(&self, boundary: &str, mut read_file: F) -> AppResult<Bytes>
    where
        F: FnMut(&str) -> AppResult<Vec<u8>>,
    {
        let mut buf = BytesMut::new();

        for part in &self.parts {
            buf.put_slice(b"--");
            buf.put_slice(boundary.as_bytes());
            buf.put_slice(CRLF);

            match part {
                Part::Text { name, value } => {
                    buf.put_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"",
                            escape_quoted(name)
                        )
                        .as_bytes(),
                    );
                    buf.put_slice(CRLF);
                    buf.put_slice(CRLF);
                    buf.put_slice(value.as_bytes());
                }
                Part::File {
                    name,
                    file_name,
                    content_type,
                    uri,
                } => {
                    let body = read_file(uri)?;
                    buf.put_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
                            escape_quoted(name),
                            escape_quoted(file_name)
                        )
                        .as_bytes(),
                    );
                    buf.put_slice(CRLF);
                    buf.put_slice(format!("Content-Type: {}", content_type).as_bytes());
                    buf.put_slice(CRLF);
                    buf.put_slice(CRLF);
                    buf.put_slice(&body);
                }
            }
            buf.put_slice(CRLF);
        }

        buf.put_slice(b"--");
        buf.put_slice(boundary.as_bytes());
        buf.put_slice(b"--");
        buf.put_slice(CRLF);

        Ok(buf.freeze())
    }
}

/// Random boundary token for a new request body.
pub fn generate_boundary() -> String {
    format!("----rtimesheet{}", uuid::Uuid::new_v4().simple())
}

fn escape_quoted(s: &str) -> String {
    s.replace('\r', "%0D")
        .replace('\n', "%0A")
        .replace('"', "%22")
}
