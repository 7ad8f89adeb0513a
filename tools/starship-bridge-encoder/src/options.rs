//! LayerZero V2 executor options (type 3).
//!
//! Layout: `u16 type (=3)` followed by one record per option:
//! - u8 worker id (executor = 1)
//! - u16 option length (option type byte + params)
//! - u8 option type
//! - params, packed big-endian

use alloy_primitives::{Bytes, FixedBytes};

pub const OPTIONS_TYPE_3: u16 = 3;
pub const EXECUTOR_WORKER_ID: u8 = 1;

/// Gas for `lzReceive` on the destination.
pub const DEFAULT_LZ_RECEIVE_GAS: u128 = 300_000;
/// Gas for `lzCompose` on the destination composer.
pub const DEFAULT_LZ_COMPOSE_GAS: u128 = 700_000;
/// Native value forwarded to the composer (0.00045 ether).
pub const DEFAULT_LZ_COMPOSE_VALUE: u128 = 450_000_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ExecutorOptionType {
    LzReceive = 1,
    NativeDrop = 2,
    LzCompose = 3,
    OrderedExecution = 4,
}

/// Builder for a type-3 options blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutorOptions {
    buf: Vec<u8>,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutorOptions {
    pub fn new() -> Self {
        Self {
            buf: OPTIONS_TYPE_3.to_be_bytes().to_vec(),
        }
    }

    /// Gas (and optional native value) for `lzReceive`. A zero value is omitted from the params.
    pub fn add_lz_receive(mut self, gas: u128, value: u128) -> Self {
        let mut params = Vec::with_capacity(32);
        params.extend_from_slice(&gas.to_be_bytes());
        if value != 0 {
            params.extend_from_slice(&value.to_be_bytes());
        }
        self.push(ExecutorOptionType::LzReceive, &params);
        self
    }

    pub fn add_native_drop(mut self, amount: u128, receiver: FixedBytes<32>) -> Self {
        let mut params = Vec::with_capacity(48);
        params.extend_from_slice(&amount.to_be_bytes());
        params.extend_from_slice(receiver.as_slice());
        self.push(ExecutorOptionType::NativeDrop, &params);
        self
    }

    /// Gas (and optional native value) for the compose call at `index`.
    pub fn add_lz_compose(mut self, index: u16, gas: u128, value: u128) -> Self {
        let mut params = Vec::with_capacity(34);
        params.extend_from_slice(&index.to_be_bytes());
        params.extend_from_slice(&gas.to_be_bytes());
        if value != 0 {
            params.extend_from_slice(&value.to_be_bytes());
        }
        self.push(ExecutorOptionType::LzCompose, &params);
        self
    }

    pub fn add_ordered_execution(mut self) -> Self {
        self.push(ExecutorOptionType::OrderedExecution, &[]);
        self
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.buf)
    }

    fn push(&mut self, option_type: ExecutorOptionType, params: &[u8]) {
        // Params are at most 48 bytes, so the length always fits a u16.
        let option_len = (params.len() + 1) as u16;
        self.buf.push(EXECUTOR_WORKER_ID);
        self.buf.extend_from_slice(&option_len.to_be_bytes());
        self.buf.push(option_type as u8);
        self.buf.extend_from_slice(params);
    }
}

/// Options used for composed ONFT transfers: `lzReceive` 300k gas, then compose 700k gas with
/// 0.00045 ether forwarded.
pub fn default_compose_options() -> Bytes {
    ExecutorOptions::new()
        .add_lz_receive(DEFAULT_LZ_RECEIVE_GAS, 0)
        .add_lz_compose(0, DEFAULT_LZ_COMPOSE_GAS, DEFAULT_LZ_COMPOSE_VALUE)
        .into_bytes()
}
