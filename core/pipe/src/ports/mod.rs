//! Ports & Adapters のポート定義
//!
//! - outbound: usecase が外界（割り込み・表示）に依頼するための trait

pub mod outbound;
