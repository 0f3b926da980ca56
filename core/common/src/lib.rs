//! マイグレーションランナー共通ライブラリ
//!
//! `pipe` クレートで使うエラー型・構造化ログを提供します。

/// エラーハンドリング
pub mod error;

/// Ports & Adapters のポート定義
pub mod ports;

/// ポートの標準実装
pub mod adapter;
