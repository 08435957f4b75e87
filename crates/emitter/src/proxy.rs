use crate::error::{EmitError, Result};
use crate::remap::remap_by_column;
use push4_selectors::{ImageData, PixelSelector};
use std::fmt::Write;

/// Render the proxy lookup contract from pixel data and a fixed selector
/// layout.
///
/// The contract recovers a selector's render row from its 24-bit color key
/// within its column, then reads the true color out of per-column packed
/// tables kept in original row order. Pure: byte-identical output for
/// identical inputs.
pub fn render_proxy(image: &ImageData, layout: &[PixelSelector]) -> Result<String> {
    image.validate()?;
    let width = image.width;
    let height = image.height;

    for selector in layout {
        if usize::from(selector.column()) >= width {
            return Err(EmitError::InvalidLayout(format!(
                "layout selector {} carries column {} but the grid is only {} wide",
                selector,
                selector.column(),
                width
            )));
        }
    }

    let columns = remap_by_column(layout, width);
    for (column, entries) in &columns {
        if entries.len() > height {
            return Err(EmitError::InvalidLayout(format!(
                "column {column} holds {} selectors but the grid is only {height} tall",
                entries.len()
            )));
        }
    }

    let pixels = image.derive_targets()?;
    let pixel_at = |x: usize, y: usize| -> &PixelSelector { &pixels[y * width + x] };

    let mut render_row_lookup = String::new();
    for col in 0..width {
        writeln!(render_row_lookup, "        if (col == {col}) {{").expect("string write");
        if let Some(entries) = columns.get(&(col as u8)) {
            for entry in entries {
                writeln!(
                    render_row_lookup,
                    "            if (key == 0x{:06x}) return {};",
                    entry.color_key(),
                    entry.render_row
                )
                .expect("string write");
            }
        }
        writeln!(render_row_lookup, "        }}").expect("string write");
    }

    let mut packed_columns = String::new();
    for x in 0..width {
        let mut column_data = String::with_capacity(height * 6);
        for y in 0..height {
            let pixel = pixel_at(x, y);
            write!(
                column_data,
                "{:02x}{:02x}{:02x}",
                pixel.red(),
                pixel.green(),
                pixel.blue()
            )
            .expect("string write");
        }
        writeln!(packed_columns, "        if (col == {x}) data = hex\"{column_data}\";").expect("string write");
    }

    Ok(format!(
        r#"// SPDX-License-Identifier: MIT
pragma solidity >=0.8.30;

import {{ PUSH4 }} from "./PUSH4.sol";
import {{ PUSH4Core }} from "./PUSH4Core.sol";

/**
 * @title PUSH4ProxyTemplate
 * @notice Renders a pixel art image ({width}x{height} grid)
 */
contract PUSH4ProxyTemplate {{
    PUSH4 public push4;
    PUSH4Core public push4core;

    constructor(address _push4, address _push4core) {{
        push4 = PUSH4(_push4);
        push4core = PUSH4Core(_push4core);
    }}

    function execute(bytes4 selector) external pure returns (bytes4) {{
        uint8 r = uint8(selector[0]);
        uint8 g = uint8(selector[1]);
        uint8 b = uint8(selector[2]);
        uint8 col = uint8(selector[3]);

        // Get the render row (y position the renderer will assign)
        uint8 renderRow = getRenderRow(r, g, b, col);

        // Get pixel color at (col, renderRow)
        (uint8 pr, uint8 pg, uint8 pb) = getPixel(col, renderRow);

        return bytes4(bytes.concat(bytes1(pr), bytes1(pg), bytes1(pb), bytes1(col)));
    }}

    function getRenderRow(uint8 r, uint8 g, uint8 b, uint8 col) internal pure returns (uint8) {{
        uint24 key = (uint24(r) << 16) | (uint24(g) << 8) | uint24(b);

{render_row_lookup}        return 0;
    }}

    function getPixel(uint8 col, uint8 row) internal pure returns (uint8 r, uint8 g, uint8 b) {{
        bytes memory data;

{packed_columns}
        uint256 offset = uint256(row) * 3;
        r = uint8(data[offset]);
        g = uint8(data[offset + 1]);
        b = uint8(data[offset + 2]);
    }}
}}
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// 2x3 grid with hand-picked colors; column byte trails each pixel.
    fn tiny_image() -> ImageData {
        ImageData {
            width: 2,
            height: 3,
            pixels: vec![
                "30201000".to_string(),
                "aabbcc01".to_string(),
                "10203000".to_string(),
                "ddeeff01".to_string(),
                "20100100".to_string(),
                "01020301".to_string(),
            ],
        }
    }

    fn layout_of(image: &ImageData) -> Vec<PixelSelector> {
        image.derive_targets().expect("targets")
    }

    #[test]
    fn lookup_reflects_render_row_ranks() {
        let image = tiny_image();
        let source = render_proxy(&image, &layout_of(&image)).expect("render");

        // Column 0 values: 0x30201000, 0x10203000, 0x20100100 at source rows
        // 0, 1, 2 -> ranks 0x102030=0, 0x201001=1, 0x302010=2.
        assert!(source.contains("if (key == 0x102030) return 0;"));
        assert!(source.contains("if (key == 0x201001) return 1;"));
        assert!(source.contains("if (key == 0x302010) return 2;"));
    }

    #[test]
    fn packed_tables_keep_original_row_order() {
        let image = tiny_image();
        let source = render_proxy(&image, &layout_of(&image)).expect("render");

        // Column 0 colors top-to-bottom: 302010, 102030, 201001.
        assert!(source.contains("if (col == 0) data = hex\"302010102030201001\";"));
        // Column 1: aabbcc, ddeeff, 010203.
        assert!(source.contains("if (col == 1) data = hex\"aabbccddeeff010203\";"));
    }

    #[test]
    fn rendering_is_byte_identical_across_runs() {
        let image = tiny_image();
        let layout = layout_of(&image);
        let first = render_proxy(&image, &layout).expect("render");
        let second = render_proxy(&image, &layout).expect("render");
        assert_eq!(first, second);
    }

    #[test]
    fn layout_column_out_of_range_is_rejected() {
        let image = tiny_image();
        // Column byte 0x05 cannot exist in a 2-wide grid.
        let layout = vec![PixelSelector::new(0, [1, 2, 3, 5])];
        assert!(matches!(
            render_proxy(&image, &layout),
            Err(EmitError::InvalidLayout(_))
        ));
    }

    #[test]
    fn overfull_column_is_rejected() {
        let image = tiny_image();
        // Four distinct values in column 0 of a 3-tall grid.
        let layout = vec![
            PixelSelector::new(0, [0, 0, 1, 0]),
            PixelSelector::new(1, [0, 0, 2, 0]),
            PixelSelector::new(2, [0, 0, 3, 0]),
            PixelSelector::new(3, [0, 0, 4, 0]),
        ];
        assert!(matches!(
            render_proxy(&image, &layout),
            Err(EmitError::InvalidLayout(_))
        ));
    }

    #[test]
    fn deployed_layout_renders_against_matching_grid() {
        // 15x25 grid, blue channel varied by row so every selector is unique.
        let mut pixels = Vec::new();
        for row in 0..25 {
            for col in 0..15 {
                pixels.push(format!("4c34{:02x}{:02x}", 0x20 + row, col));
            }
        }
        let image = ImageData {
            width: 15,
            height: 25,
            pixels,
        };
        let source =
            render_proxy(&image, &crate::deployed_layout()).expect("render deployed layout");
        assert!(source.contains("if (col == 14) {"));
        assert!(source.contains("uint24 key = (uint24(r) << 16) | (uint24(g) << 8) | uint24(b);"));
    }
}
