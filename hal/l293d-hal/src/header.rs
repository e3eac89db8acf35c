//! Raspberry Pi 40-pin header map
//!
//! Translates physical header positions (BOARD numbering) into the SoC's
//! BCM GPIO line numbers. Power and ground positions have no line.

/// Number of positions on the header
pub const HEADER_PINS: u8 = 40;

/// BCM line for each header position, index 0 = pin 1
const BCM_LINES: [Option<u8>; HEADER_PINS as usize] = [
    None,     // 1  3V3
    None,     // 2  5V
    Some(2),  // 3  SDA1
    None,     // 4  5V
    Some(3),  // 5  SCL1
    None,     // 6  GND
    Some(4),  // 7
    Some(14), // 8  TXD
    None,     // 9  GND
    Some(15), // 10 RXD
    Some(17), // 11
    Some(18), // 12
    Some(27), // 13
    None,     // 14 GND
    Some(22), // 15
    Some(23), // 16
    None,     // 17 3V3
    Some(24), // 18
    Some(10), // 19 MOSI
    None,     // 20 GND
    Some(9),  // 21 MISO
    Some(25), // 22
    Some(11), // 23 SCLK
    Some(8),  // 24 CE0
    None,     // 25 GND
    Some(7),  // 26 CE1
    Some(0),  // 27 ID_SD
    Some(1),  // 28 ID_SC
    Some(5),  // 29
    None,     // 30 GND
    Some(6),  // 31
    Some(12), // 32
    Some(13), // 33
    None,     // 34 GND
    Some(19), // 35
    Some(16), // 36
    Some(26), // 37
    Some(20), // 38
    None,     // 39 GND
    Some(21), // 40
];

/// Look up the BCM line behind a header pin
///
/// Returns `None` for power/ground positions and for numbers outside 1-40.
pub fn bcm_line(pin: u8) -> Option<u8> {
    if pin == 0 || pin > HEADER_PINS {
        return None;
    }
    BCM_LINES[(pin - 1) as usize]
}

/// Check whether a header pin carries a GPIO line
pub fn is_gpio(pin: u8) -> bool {
    bcm_line(pin).is_some()
}
