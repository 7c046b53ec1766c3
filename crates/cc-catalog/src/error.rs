/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Coin Catalog contributors
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use thiserror::Error;

/// Error taxonomy for the catalog domain.
///
/// Failures with a documented fallback (the pair registry's built-in set,
/// the resolver's cross-source fallback) are absorbed where they occur and
/// never surface through this type.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
  /// A collaborator could not be reached or answered with a server error
  #[error("Upstream unavailable: {0}")]
  Upstream(String),

  /// A collaborator answered, but the response was malformed or incomplete
  #[error("Upstream response degraded: {0}")]
  Degraded(String),

  /// The snapshot file could not be written or read
  #[error("Persistence failure: {0}")]
  Persistence(String),

  /// A refresh is already running
  #[error("A refresh is already running")]
  Conflict,

  /// No snapshot exists yet, no price from any source, or no match
  #[error("Not found: {0}")]
  NotFound(String),

  /// The stored snapshot does not parse into the expected structure
  #[error("Snapshot is corrupt: {0}")]
  Corrupt(String),
}

impl From<cc_core::Error> for CatalogError {
  fn from(err: cc_core::Error) -> Self {
    match err {
      cc_core::Error::Http(msg) => CatalogError::Upstream(msg),
      cc_core::Error::Parse(msg) | cc_core::Error::MissingField(msg) => {
        CatalogError::Degraded(msg)
      }
      other => CatalogError::Upstream(other.to_string()),
    }
  }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
