//! Integration tests for common utilities module.

use cache_sim::common::*;

fn bytes(data: u32) -> Vec<u8> {
    data_bytes(data).collect()
}

/// Tests layout bit widths derived from the geometry.
#[test]
fn test_layout_bit_widths() {
    let layout = AddressLayout::new(4, 8);
    assert_eq!(layout.offset_bits(), 3);
    assert_eq!(layout.index_bits(), 2);
    assert_eq!(layout.line_size(), 8);
}

/// Tests offset, index and tag extraction.
#[test]
fn test_layout_decomposition() {
    let layout = AddressLayout::new(4, 8);
    let addr = 0x1234_567D;

    assert_eq!(layout.offset(addr), 5);
    assert_eq!(layout.index(addr), 3);
    assert_eq!(layout.direct_tag(addr), 0x0091_A2B3);
    assert_eq!(layout.block_tag(addr), 0x0246_8ACF);
    assert_eq!(layout.block_base(addr), 0x1234_5678);
}

/// Tests that index wraps modulo the line count.
#[test]
fn test_layout_index_wraps() {
    let layout = AddressLayout::new(4, 8);
    assert_eq!(layout.index(0x00), 0);
    assert_eq!(layout.index(0x18), 3);
    assert_eq!(layout.index(0x20), 0);
    assert_eq!(layout.direct_tag(0x20), 1);
}

/// Tests a single-line cache has no index bits.
#[test]
fn test_layout_single_line() {
    let layout = AddressLayout::new(1, 16);
    assert_eq!(layout.index(0xFFFF_FFFF), 0);
    assert_eq!(layout.direct_tag(0x40), 4);
    assert_eq!(layout.block_tag(0x40), 4);
}

/// Tests that shifts covering the whole address yield tag 0.
#[test]
fn test_layout_wide_geometry() {
    let layout = AddressLayout::new(2, 1 << 31);
    assert_eq!(layout.direct_tag(0xFFFF_FFFF), 0);
    assert_eq!(layout.block_tag(0xFFFF_FFFF), 1);
    assert_eq!(layout.offset(0xFFFF_FFFF), 0x7FFF_FFFF);
    assert_eq!(layout.index(0xFFFF_FFFF), 1);
}

/// Tests byte splitting of store values.
#[test]
fn test_data_bytes() {
    assert_eq!(bytes(0), vec![0]);
    assert_eq!(bytes(1), vec![1]);
    assert_eq!(bytes(255), vec![255]);
    assert_eq!(bytes(256), vec![0, 1]);
    assert_eq!(bytes(0x0001_0000), vec![0, 0, 1]);
    assert_eq!(bytes(0xDEAD_BEEF), vec![0xEF, 0xBE, 0xAD, 0xDE]);
}

/// Tests request constructors.
#[test]
fn test_request_constructors() {
    let r = Request::read(0x40);
    assert_eq!(r.data, 0);
    assert!(!r.is_write);
    assert_eq!(r.access_type(), AccessType::Read);

    let w = Request::write(0x40, 7);
    assert_eq!(w.data, 7);
    assert_eq!(w.access_type(), AccessType::Write);
}

/// Tests diagnostic display formatting.
#[test]
fn test_diagnostic_display() {
    let d = Diagnostic::CapacityExceeded {
        address: 6,
        written: 2,
        total: 4,
    };
    let s = format!("{}", d);
    assert!(s.contains("CapacityExceeded"));
    assert!(s.contains("0x00000006"));
    assert!(s.contains("2 of 4"));

    let d = Diagnostic::DataUnavailable { address: 0x10 };
    assert!(format!("{}", d).contains("DataUnavailable"));
}

/// Tests error display formatting.
#[test]
fn test_sim_error_display() {
    let e = SimError::Parse {
        line: 7,
        message: "invalid operation: X".to_string(),
    };
    let s = format!("{}", e);
    assert!(s.contains("line 7"));
    assert!(s.contains("invalid operation"));

    let e = SimError::InvalidConfiguration("cache lines must be a power of two".into());
    assert!(format!("{}", e).starts_with("InvalidConfiguration"));
}
