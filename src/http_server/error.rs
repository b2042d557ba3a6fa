use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Why a page could not be rendered.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Unknown handle, or a release that is missing or not live. Nothing else
    /// is processed once this is raised.
    #[error("page not found")]
    NotFound,
    #[error("{0:?}")]
    Internal(color_eyre::Report),
}

impl From<color_eyre::Report> for PageError {
    fn from(err: color_eyre::Report) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            PageError::Internal(err) => {
                tracing::error!("{err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PageError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PageError::from(color_eyre::eyre::eyre!("boom"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
