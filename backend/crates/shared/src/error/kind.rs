//! Error Kind
//!
//! 呼び出し側（API 層など）が応答ステータスとリトライ方針を決めるための分類。

use serde::Serialize;

/// エラー種別
///
/// `PlaytrackError` と永続化層のエラーは、境界でいずれかの種別に集約されます。
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Conflict.status_code(), 409);
/// assert!(ErrorKind::ServiceUnavailable.is_retryable());
/// assert!(!ErrorKind::Conflict.is_retryable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// 入力値の検証失敗（タイトル、評価、コメント長、日付範囲など）
    BadRequest,
    /// ユーザー名またはパスワードの不一致
    Unauthorized,
    /// 他プレイヤーに代わっての操作
    Forbidden,
    NotFound,
    /// 現在の状態との競合（不正な状態遷移、進行中ゲームの重複、ユーザー名の重複）
    Conflict,
    InternalServerError,
    /// 永続化層が一時的に利用不可
    ServiceUnavailable,
}

impl ErrorKind {
    pub const fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::InternalServerError => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// 機械可読なコード（シリアライズ結果と同じ）
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::InternalServerError => "INTERNAL_SERVER_ERROR",
            ErrorKind::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// 同じ操作をそのまま再試行して成功し得るか
    ///
    /// コア自身は再試行しない。判断は呼び出し側に委ねる。
    pub const fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::ServiceUnavailable)
    }

    /// 5xx（ログに残すべきもの）
    pub const fn is_server_error(self) -> bool {
        matches!(
            self,
            ErrorKind::InternalServerError | ErrorKind::ServiceUnavailable
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorKind; 7] = [
        ErrorKind::BadRequest,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::InternalServerError,
        ErrorKind::ServiceUnavailable,
    ];

    #[test]
    fn test_code_matches_serialization() {
        for kind in ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.code()));
        }
    }

    #[test]
    fn test_only_unavailable_is_retryable() {
        let retryable: Vec<_> = ALL.into_iter().filter(|k| k.is_retryable()).collect();
        assert_eq!(retryable, [ErrorKind::ServiceUnavailable]);
    }

    #[test]
    fn test_server_errors_are_5xx() {
        for kind in ALL {
            assert_eq!(kind.is_server_error(), kind.status_code() >= 500);
        }
    }
}
