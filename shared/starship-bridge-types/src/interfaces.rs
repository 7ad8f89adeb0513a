//! Solidity ABI surface of the Starship ONFT contract.
//!
//! Every call the client issues is declared here with its exact argument and return types, so
//! selectors and encodings are checked at compile time rather than looked up in a JSON ABI.

use alloy_sol_types::sol;

sol! {
    /// LayerZero V2 ONFT721 send parameters.
    struct SendParam {
        uint32 dstEid;
        bytes32 to;
        uint256 tokenId;
        bytes extraOptions;
        bytes composeMsg;
        bytes onftCmd;
    }

    /// Fee required to carry a message to the destination endpoint.
    struct MessagingFee {
        uint256 nativeFee;
        uint256 lzTokenFee;
    }

    interface IStarshipONFT {
        function quoteSend(SendParam _sendParam, bool _payInLzToken)
            external
            view
            returns (MessagingFee msgFee);
        function send(
            SendParam _sendParam,
            MessagingFee _fee,
            address _refundAddress,
            address _composer
        ) external payable;
        function mint(address to, uint256 amount) external;
        function balanceOf(address owner) external view returns (uint256);
        function ownerOf(uint256 tokenId) external view returns (address);
        function tokenURI(uint256 tokenId) external view returns (string);
    }
}
