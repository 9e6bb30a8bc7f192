//! Register File Tests.
//!
//! Verifies bank separation and that index 0 of either bank always reads zero.

use dualsim_core::common::{RegId, RegisterFile};
use proptest::prelude::*;

#[test]
fn banks_are_independent() {
    let mut regs = RegisterFile::new();
    regs.write(RegId::int(3), 7);
    regs.write(RegId::float(3), 0x4040_0000);
    assert_eq!(regs.read(RegId::int(3)), 7);
    assert_eq!(regs.read_float(3), 0x4040_0000);
    assert_eq!(regs.int_bank()[3], 7, "snapshot should reflect the write");
}

proptest! {
    #[test]
    fn zero_register_ignores_writes(value in any::<u32>(), float in any::<bool>()) {
        let mut regs = RegisterFile::new();
        let reg = if float { RegId::float(0) } else { RegId::int(0) };
        regs.write(reg, value);
        prop_assert_eq!(regs.read(reg), 0);
    }

    #[test]
    fn nonzero_registers_hold_their_value(idx in 1u8..32, value in any::<u32>()) {
        let mut regs = RegisterFile::new();
        regs.write(RegId::int(idx), value);
        prop_assert_eq!(regs.read_int(idx as usize), value);
        prop_assert_eq!(regs.read_float(idx as usize), 0);
    }
}
