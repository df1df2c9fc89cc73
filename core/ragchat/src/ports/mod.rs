//! Ports（Inbound: CLI から呼ぶ / Outbound: usecase が外界を使う）

pub mod inbound;
pub mod outbound;
