//! Property-based tests for the stepping rule and the reciprocal signal path.

use proptest::prelude::*;

use enigma_machine::config::{MachineConfig, Setup};
use enigma_machine::machine::Machine;

const CATALOG: &str = "
    ABCDEFGHIJKLMNOPQRSTUVWXYZ 5 3
    I     MQ  (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
    II    ME  (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
    III   MV  (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
    IV    MJ  (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
    VI    MZM (AJQDVLEOZWIYTS) (CGMNHFUX) (BPRK)
    Beta  N   (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
    Gamma N   (AFNIRLBSQWVXGUZDKMTPCOYJHE)
    B     R   (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
    C     R   (AR) (BD) (CO) (EJ) (FN) (GT) (HK) (IV) (LM) (PW) (QZ) (SX) (UY)
";

const MOVING: [&str; 5] = ["I", "II", "III", "IV", "VI"];

fn setup_line() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("B"), Just("C")],
        prop_oneof![Just("Beta"), Just("Gamma")],
        Just(MOVING.to_vec()).prop_shuffle(),
        "[A-Z]{4}",
        Just(('A'..='Z').collect::<Vec<_>>()).prop_shuffle(),
        0usize..=10,
    )
        .prop_map(|(reflector, fixed, moving, setting, letters, plugs)| {
            let plugboard: Vec<String> = letters
                .chunks(2)
                .take(plugs)
                .map(|pair| format!("({}{})", pair[0], pair[1]))
                .collect();
            format!(
                "* {reflector} {fixed} {} {} {} {setting} {}",
                moving[0],
                moving[1],
                moving[2],
                plugboard.join(" ")
            )
        })
}

fn machine_for(line: &str) -> Machine {
    let config = MachineConfig::parse(CATALOG).unwrap();
    let mut machine = Machine::new(&config).unwrap();
    machine
        .apply_setup(&Setup::parse(line, &config).unwrap())
        .unwrap();
    machine
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn same_setup_decodes_its_own_output(line in setup_line(), message in "[A-Z]{0,200}") {
        let cipher = machine_for(&line).convert(&message).unwrap();
        prop_assert_eq!(cipher.len(), message.len());
        let plain = machine_for(&line).convert(&cipher).unwrap();
        prop_assert_eq!(plain, message);
    }

    #[test]
    fn symbols_never_encode_to_themselves(line in setup_line(), message in "[A-Z]{1,100}") {
        let cipher = machine_for(&line).convert(&message).unwrap();
        for (p, c) in message.chars().zip(cipher.chars()) {
            prop_assert_ne!(p, c);
        }
    }

    #[test]
    fn only_flagged_moving_rotors_change(line in setup_line(), steps in 1usize..300) {
        let mut machine = machine_for(&line);
        for _ in 0..steps {
            let flags = machine.advance_set();
            let moving: Vec<bool> = machine.rotors().iter().map(|r| r.rotates()).collect();
            let before: Vec<char> = machine.settings().chars().collect();
            machine.convert_index(0).unwrap();
            let after: Vec<char> = machine.settings().chars().collect();

            prop_assert!(flags[machine.num_slots() - 1]);
            for i in 1..machine.num_slots() {
                let changed = before[i - 1] != after[i - 1];
                prop_assert_eq!(changed, flags[i] && moving[i]);
            }
        }
    }
}
