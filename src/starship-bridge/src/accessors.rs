//! Read-only pass-throughs (`balanceOf`, `ownerOf`, `tokenURI`).

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use starship_bridge_types::IStarshipONFT;
use tracing::debug;

use crate::{
    binding::ContractBinding,
    cancel::CallOptions,
    errors::{BridgeError, Result},
    rpc::ReadClient,
};

/// `eth_call` against the bound contract, returning the raw return data.
pub(crate) async fn read_raw<R: ReadClient, W>(
    binding: &ContractBinding<R, W>,
    data: Vec<u8>,
    opts: &CallOptions,
) -> Result<Bytes> {
    let data = Bytes::from(data);
    opts.run(async {
        binding
            .reader()
            .call(binding.address(), data)
            .await
            .map_err(BridgeError::from)
    })
    .await
}

/// Encode `call`, issue it, decode its typed return.
pub(crate) async fn read_call<C: SolCall, R: ReadClient, W>(
    binding: &ContractBinding<R, W>,
    call: &C,
    opts: &CallOptions,
) -> Result<C::Return> {
    let out = read_raw(binding, call.abi_encode(), opts).await?;
    debug!(
        network = binding.network(),
        function = C::SIGNATURE,
        return_len = out.len(),
        "read call returned"
    );
    Ok(C::abi_decode_returns(&out, true)?)
}

pub async fn balance_of<R: ReadClient, W>(
    binding: &ContractBinding<R, W>,
    owner: Address,
    opts: &CallOptions,
) -> Result<U256> {
    let ret = read_call(binding, &IStarshipONFT::balanceOfCall { owner }, opts).await?;
    Ok(ret._0)
}

pub async fn owner_of<R: ReadClient, W>(
    binding: &ContractBinding<R, W>,
    token_id: U256,
    opts: &CallOptions,
) -> Result<Address> {
    let ret = read_call(binding, &IStarshipONFT::ownerOfCall { tokenId: token_id }, opts).await?;
    Ok(ret._0)
}

pub async fn token_uri<R: ReadClient, W>(
    binding: &ContractBinding<R, W>,
    token_id: U256,
    opts: &CallOptions,
) -> Result<String> {
    let ret = read_call(binding, &IStarshipONFT::tokenURICall { tokenId: token_id }, opts).await?;
    Ok(ret._0)
}
