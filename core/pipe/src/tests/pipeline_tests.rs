//! producer → relay → consumer をつないだ結合テスト

use std::thread;

use crate::adapter::InterruptHub;
use crate::channel::{self, PipeReceiver, PipeSender};
use crate::domain::{Message, MigrationFile, RenderConfig};
use crate::ports::outbound::InterruptSource;
use crate::usecase::{read_errors, wait_and_redirect, write_pipe};

/// 2 段目の pipe を作って relay を別スレッドで走らせる（マイグレーション本体が driver の出力を中継する形）
fn relay_stage(
    inbound: PipeReceiver,
    hub: &InterruptHub,
) -> (PipeReceiver, thread::JoinHandle<bool>) {
    let (out_tx, out_rx) = channel::new();
    let sub = hub.subscribe();
    let handle = thread::spawn(move || {
        let ok = wait_and_redirect(Some(&inbound), Some(&out_tx), Some(sub));
        out_tx.close(None);
        ok
    });
    (out_rx, handle)
}

fn driver(pipe: PipeSender) {
    let _ = pipe.send("migrating to version 3");
    let _ = pipe.send(MigrationFile::up("3_up.sql"));
    let _ = pipe.send(Message::other(3));
    pipe.close(None);
}

#[test]
fn test_relayed_output_matches_direct_output() {
    let (tx, rx) = channel::new();
    let producer = thread::spawn(move || driver(tx));
    let mut direct = Vec::new();
    let direct_ok = write_pipe(Some(&rx), &mut direct, RenderConfig::plain());
    producer.join().unwrap();

    let hub = InterruptHub::new();
    let (tx, rx) = channel::new();
    let producer = thread::spawn(move || driver(tx));
    let (out_rx, relay) = relay_stage(rx, &hub);
    let mut relayed = Vec::new();
    let relayed_ok = write_pipe(Some(&out_rx), &mut relayed, RenderConfig::plain());
    producer.join().unwrap();

    assert!(relay.join().unwrap());
    assert_eq!(direct_ok, relayed_ok);
    assert_eq!(direct, relayed);
    assert_eq!(hub.subscriber_count(), 0);
}

#[test]
fn test_chained_relays_keep_order() {
    let hub = InterruptHub::new();
    let (tx, rx) = channel::new();
    let producer = thread::spawn(move || {
        for i in 1..=20 {
            let _ = tx.send(MigrationFile::up(format!("{}_up.sql", i)));
        }
        tx.close(None);
    });
    let (mid_rx, first) = relay_stage(rx, &hub);
    let (out_rx, second) = relay_stage(mid_rx, &hub);

    let names: Vec<String> = out_rx
        .iter()
        .map(|m| match m {
            Message::Migration(f) => f.file_name,
            other => panic!("unexpected {:?}", other),
        })
        .collect();
    producer.join().unwrap();
    assert!(first.join().unwrap());
    assert!(second.join().unwrap());
    let expected: Vec<String> = (1..=20).map(|i| format!("{}_up.sql", i)).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_errors_collected_through_relay() {
    let hub = InterruptHub::new();
    let (tx, rx) = channel::new();
    let producer = thread::spawn(move || {
        let _ = tx.send("applying 4_up.sql");
        let _ = tx.send(Message::failure(anyhow::anyhow!("duplicate column")));
        let _ = tx.send("rolling back");
        tx.close(Some(anyhow::anyhow!("migration aborted")));
    });
    let (out_rx, relay) = relay_stage(rx, &hub);
    let errors = read_errors(Some(&out_rx));
    producer.join().unwrap();

    assert!(!relay.join().unwrap());
    let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(msgs, vec!["duplicate column", "migration aborted"]);
}
