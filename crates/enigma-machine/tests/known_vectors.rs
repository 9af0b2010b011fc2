//! Historical machine vectors on the M4 naval catalog.

use enigma_core::CoreError;
use enigma_machine::config::{MachineConfig, Setup};
use enigma_machine::machine::Machine;
use enigma_machine::{ConfigError, MachineError};

const NAVAL: &str = "
    ABCDEFGHIJKLMNOPQRSTUVWXYZ 5 3
    I     MQ  (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
    II    ME  (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
    III   MV  (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
    IV    MJ  (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
    V     MZ  (AVOLDRWFIUQ)(BZKSMNHYC) (EGTJPX)
    VI    MZM (AJQDVLEOZWIYTS) (CGMNHFUX) (BPRK)
    VII   MZM (ANOUPFRIMBZTLWKSVEGCJYDHXQ)
    VIII  MZM (AFLSETWUNDHOZVICQ) (BKJ) (GXY) (MPR)
    Beta  N   (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
    Gamma N   (AFNIRLBSQWVXGUZDKMTPCOYJHE)
    B     R   (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
    C     R   (AR) (BD) (CO) (EJ) (FN) (GT) (HK) (IV) (LM) (PW) (QZ) (SX) (UY)
";

fn machine_with(setup: &str) -> (MachineConfig, Machine) {
    let config = MachineConfig::parse(NAVAL).unwrap();
    let mut machine = Machine::new(&config).unwrap();
    let setup = Setup::parse(setup, &config).unwrap();
    machine.apply_setup(&setup).unwrap();
    (config, machine)
}

#[test]
fn catalog_loads() {
    let config = MachineConfig::parse(NAVAL).unwrap();
    assert_eq!(config.rotors.len(), 12);
    let machine = Machine::new(&config).unwrap();
    assert_eq!(machine.catalog().len(), 12);
    assert_eq!(machine.num_slots(), 5);
    assert_eq!(machine.num_pawls(), 3);
}

#[test]
fn five_a_from_ground_setting() {
    let (_, mut machine) = machine_with("* B Beta I II III AAAA");
    assert_eq!(machine.convert("AAAAA").unwrap(), "BDZGO");
    assert_eq!(machine.settings(), "AAAF");
}

#[test]
fn hiawatha_with_plugboard() {
    let (_, mut machine) = machine_with("* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)");
    assert_eq!(
        machine.convert("FROMHISSHOULDERHIAWATHA").unwrap(),
        "QVPQSOKOILPUBKJZPISFXDW"
    );
    assert_eq!(machine.settings(), "AXMB");
}

#[test]
fn hiawatha_with_other_plugs() {
    let (_, mut machine) = machine_with("* B Beta III IV I AXLE (YF) (ZH)");
    assert_eq!(
        machine.convert("FROMHISSHOULDERHIAWATHA").unwrap(),
        "AFIZKBKOXLIUFDCQPPSYSZW"
    );
}

#[test]
fn middle_rotor_double_steps() {
    let (_, mut machine) = machine_with("* B Beta I II III AADU");
    let mut windows = Vec::new();
    for _ in 0..3 {
        machine.convert("A").unwrap();
        windows.push(machine.settings());
    }
    assert_eq!(windows, ["AADV", "AAEW", "ABFX"]);
}

#[test]
fn plugboard_swaps_around_rotors() {
    let (_, mut machine) = machine_with("* B Beta I II III AAAA (AB)");
    assert_eq!(machine.convert("HELLO WORLD").unwrap(), "ILADB BMTBZ");
}

#[test]
fn decoding_restores_plaintext() {
    let setup = "* C Gamma VI VIII V QRZA (AM) (FI) (NV) (PS) (TU) (WZ)";
    let plain = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOGXXATTACKATDAWN";

    let (_, mut sender) = machine_with(setup);
    let cipher = sender.convert(plain).unwrap();
    assert_ne!(cipher, plain);

    let (_, mut receiver) = machine_with(setup);
    assert_eq!(receiver.convert(&cipher).unwrap(), plain);
}

#[test]
fn reapplying_setup_resets_machine() {
    let (config, mut machine) = machine_with("* B Beta I II III AAAA");
    let first = machine.convert("HELLOWORLD").unwrap();

    let setup = Setup::parse("* B Beta I II III AAAA", &config).unwrap();
    machine.apply_setup(&setup).unwrap();
    assert_eq!(machine.convert("HELLOWORLD").unwrap(), first);
}

#[test]
fn no_symbol_encodes_to_itself() {
    let (_, mut machine) = machine_with("* B Beta I II III AAAA");
    let plain = "A".repeat(500);
    let cipher = machine.convert(&plain).unwrap();
    assert!(!cipher.contains('A'));
}

#[test]
fn bad_setups_are_rejected() {
    let config = MachineConfig::parse(NAVAL).unwrap();
    let mut machine = Machine::new(&config).unwrap();

    let apply = |machine: &mut Machine, line: &str| -> Result<(), ConfigError> {
        let setup = Setup::parse(line, &config)?;
        machine.apply_setup(&setup)?;
        Ok(())
    };

    assert_eq!(
        apply(&mut machine, "* B Beta I II IX AAAA"),
        Err(MachineError::UnknownRotorName("IX".to_string()).into())
    );
    assert_eq!(
        apply(&mut machine, "* Beta B I II III AAAA"),
        Err(MachineError::MissingReflector("Beta".to_string()).into())
    );
    assert_eq!(
        apply(&mut machine, "* B I II III IV AAAA"),
        Err(MachineError::TooManyMovingRotors { count: 4, pawls: 3 }.into())
    );
    assert_eq!(
        apply(&mut machine, "* B Beta I II III AAA"),
        Err(MachineError::WrongSettingLength {
            expected: 4,
            actual: 3
        }
        .into())
    );
    assert!(matches!(
        apply(&mut machine, "* B Beta I II III AAAA (AB) (AC)"),
        Err(ConfigError::Machine(MachineError::Core(
            CoreError::MalformedCycleSpec(_)
        )))
    ));
}
