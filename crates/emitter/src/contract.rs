use push4_store::FunctionRecord;
use std::fmt::Write;

/// Core address baked into generated contracts unless overridden.
pub const DEFAULT_AUTHORIZED_ADDRESS: &str = "0x00000063266aAAeDD489e4956153855626E44061";

/// Render the PUSH4 contract from a resolved function table.
///
/// Pure: the output depends only on the records and the authorized-caller
/// address, so regeneration with unchanged inputs is byte-identical.
pub fn render_push4(functions: &[FunctionRecord], authorized_address: &str) -> String {
    let mut body = String::new();
    for (i, record) in functions.iter().enumerate() {
        if i > 0 {
            body.push_str("\n\n");
        }
        write!(
            body,
            "    /* 0x{selector} */\n    function {name}() external view returns (bytes4) {{\n        return _e(msg.sig);\n    }}",
            selector = record.selector,
            name = record.func_name,
        )
        .expect("writing to a String cannot fail");
    }

    format!(
        r#"// SPDX-License-Identifier: MIT
pragma solidity >=0.8.30;

contract PUSH4 {{
{body}

    /* execute through proxy (if set) or return the original selector */
    function _e(bytes4 signature) internal view returns (bytes4) {{
        address push4Core = {authorized_address};

        bytes memory proxySelector = abi.encodeWithSignature("proxy()");
        bytes memory executeSelector = abi.encodeWithSignature("execute(bytes4)", signature);

        (bool success, bytes memory result) = push4Core.staticcall(proxySelector);
        if (!success) {{
            return signature;
        }}
        address proxy = abi.decode(result, (address));
        if (proxy == address(0)) {{
            return signature;
        }}

        (bool success2, bytes memory result2) = proxy.staticcall(executeSelector);
        if (!success2) {{
            bytes memory h = "0123456789abcdef";
            bytes memory r = new bytes(10);
            r[0] = "0";
            r[1] = "x";
            for (uint256 i = 0; i < 4; i++) {{
                r[2 + i * 2] = h[uint8(signature[i]) >> 4];
                r[3 + i * 2] = h[uint8(signature[i]) & 0xf];
            }}
            revert(string(abi.encodePacked("Failed to call execute for selector: ", string(r))));
        }}
        bytes4 returnValue = abi.decode(result2, (bytes4));

        return returnValue;
    }}
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(index: usize, selector: &str, name: &str) -> FunctionRecord {
        FunctionRecord {
            index,
            selector: selector.to_string(),
            func_name: name.to_string(),
            signature: format!("{name}()"),
            params: String::new(),
            has_param: false,
            seed: name.trim_start_matches('f').to_string(),
            prefix: "f".to_string(),
        }
    }

    #[test]
    fn renders_one_function_per_record_with_selector_annotation() {
        let functions = vec![
            record(0, "4f302900", "f4075"),
            record(1, "51363301", "f88"),
        ];
        let source = render_push4(&functions, DEFAULT_AUTHORIZED_ADDRESS);

        assert!(source.contains("/* 0x4f302900 */"));
        assert!(source.contains("function f4075() external view returns (bytes4) {"));
        assert!(source.contains("/* 0x51363301 */"));
        assert!(source.contains("function f88() external view returns (bytes4) {"));
        assert!(source.contains("return _e(msg.sig);"));
    }

    #[test]
    fn authorized_address_is_substituted() {
        let functions = vec![record(0, "4f302900", "f4075")];
        let source = render_push4(&functions, "0x1111111111111111111111111111111111111111");
        assert!(source.contains("address push4Core = 0x1111111111111111111111111111111111111111;"));
        assert!(!source.contains(DEFAULT_AUTHORIZED_ADDRESS));
    }

    #[test]
    fn rendering_is_byte_identical_across_runs() {
        let functions = vec![
            record(0, "4f302900", "f4075"),
            record(1, "51363301", "f88"),
            record(2, "47312f02", "fq11"),
        ];
        let first = render_push4(&functions, DEFAULT_AUTHORIZED_ADDRESS);
        let second = render_push4(&functions, DEFAULT_AUTHORIZED_ADDRESS);
        assert_eq!(first, second);
    }
}
