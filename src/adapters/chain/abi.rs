//! Contract ABIs - Router and ERC-20 Call Encoding
//!
//! Only the four functions the swap flow needs. Encoding and decoding go
//! through `SolCall` so adapters can build plain `TransactionRequest`s.

use alloy::sol;

sol! {
    /// Uniswap V2 router (quote + exact-input swap).
    interface IUniswapV2Router02 {
        function getAmountsOut(uint256 amountIn, address[] calldata path)
            external view returns (uint256[] memory amounts);

        function swapExactTokensForTokens(
            uint256 amountIn,
            uint256 amountOutMin,
            address[] calldata path,
            address to,
            uint256 deadline
        ) external returns (uint256[] memory amounts);
    }

    /// ERC-20 allowance subset.
    interface IERC20 {
        function allowance(address owner, address spender)
            external view returns (uint256 remaining);

        function approve(address spender, uint256 amount)
            external returns (bool success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy::primitives::{Address, U256};
    use alloy::sol_types::SolCall;

    #[test]
    fn test_selectors_match_known_abi() {
        assert_eq!(
            IUniswapV2Router02::getAmountsOutCall::SELECTOR,
            [0xd0, 0x6c, 0xa6, 0x1f]
        );
        assert_eq!(
            IUniswapV2Router02::swapExactTokensForTokensCall::SELECTOR,
            [0x38, 0xed, 0x17, 0x39]
        );
        assert_eq!(IERC20::allowanceCall::SELECTOR, [0xdd, 0x62, 0xed, 0x3e]);
        assert_eq!(IERC20::approveCall::SELECTOR, [0x09, 0x5e, 0xa7, 0xb3]);
    }

    #[test]
    fn test_get_amounts_out_encoding_carries_path() {
        let call = IUniswapV2Router02::getAmountsOutCall {
            amountIn: U256::from(10u8),
            path: vec![Address::repeat_byte(0xaa), Address::repeat_byte(0xbb)],
        };
        let data = call.abi_encode();
        // selector + amount + offset + length + 2 addresses
        assert_eq!(data.len(), 4 + 32 * 5);
    }
}
