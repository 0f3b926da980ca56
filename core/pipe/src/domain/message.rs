//! pipe を流れるメッセージ
//!
//! producer が送る進捗は必ずこの enum のいずれかに包む。表示側は match で網羅的に分岐する。

use std::fmt;

/// マイグレーションの向き
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// 適用中のマイグレーションファイル（構造化された進捗イベント）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    pub file_name: String,
    pub direction: Direction,
}

impl MigrationFile {
    pub fn new(file_name: impl Into<String>, direction: Direction) -> Self {
        Self {
            file_name: file_name.into(),
            direction,
        }
    }

    pub fn up(file_name: impl Into<String>) -> Self {
        Self::new(file_name, Direction::Up)
    }

    pub fn down(file_name: impl Into<String>) -> Self {
        Self::new(file_name, Direction::Down)
    }
}

/// pipe 上の 1 アイテム
#[derive(Debug)]
pub enum Message {
    /// 進捗テキスト（1 行として表示）
    Text(String),
    /// producer 側の失敗。受け取ってもドレインは継続する
    Failure(anyhow::Error),
    /// マイグレーションファイルの適用
    Migration(MigrationFile),
    /// 上記以外の値（文字列化済み）
    Other(String),
}

impl Message {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn failure(err: impl Into<anyhow::Error>) -> Self {
        Self::Failure(err.into())
    }

    /// 任意の Display 値を Other として包む
    pub fn other(value: impl fmt::Display) -> Self {
        Self::Other(value.to_string())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Failure ならその中身を取り出す
    pub fn into_failure(self) -> Option<anyhow::Error> {
        match self {
            Self::Failure(e) => Some(e),
            _ => None,
        }
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<anyhow::Error> for Message {
    fn from(e: anyhow::Error) -> Self {
        Self::Failure(e)
    }
}

impl From<MigrationFile> for Message {
    fn from(f: MigrationFile) -> Self {
        Self::Migration(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_pick_variant() {
        assert!(matches!(Message::from("hi"), Message::Text(s) if s == "hi"));
        assert!(matches!(
            Message::from(MigrationFile::down("2_down.sql")),
            Message::Migration(MigrationFile { direction: Direction::Down, .. })
        ));
        assert!(Message::from(anyhow::anyhow!("boom")).is_failure());
    }

    #[test]
    fn test_other_stringifies_value() {
        assert!(matches!(Message::other(42), Message::Other(s) if s == "42"));
    }

    #[test]
    fn test_into_failure() {
        let err = Message::failure(anyhow::anyhow!("connection refused"))
            .into_failure()
            .unwrap();
        assert_eq!(err.to_string(), "connection refused");
        assert!(Message::text("ok").into_failure().is_none());
    }
}
