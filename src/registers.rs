// src/registers.rs

// Register addresses are the raw 6-bit values from the datasheet. The SPI address
// byte is built by `write_address` / `read_address`.

// Command and status
pub const COMMAND_REG: u8 = 0x01;        // Starts and stops command execution
pub const COM_IEN_REG: u8 = 0x02;        // Enable and disable interrupt request control bits
pub const COMM_IRQ_REG: u8 = 0x04;       // Interrupt request bits
pub const ERROR_REG: u8 = 0x06;          // Error bits showing the error status of the last command
pub const FIFO_DATA_REG: u8 = 0x09;      // FIFO data input/output
pub const FIFO_LEVEL_REG: u8 = 0x0A;     // Number of bytes in the FIFO buffer
pub const CONTROL_REG: u8 = 0x0C;        // Miscellaneous control bits
pub const BIT_FRAMING_REG: u8 = 0x0D;    // Adjustments for bit-oriented frames

// Communication
pub const MODE_REG: u8 = 0x11;           // Defines general modes for transmitting and receiving
pub const TX_CONTROL_REG: u8 = 0x14;     // Controls the antenna driver pins TX1 and TX2
pub const TX_ASK_REG: u8 = 0x15;         // Controls the setting of the transmission modulation

// Timer
pub const T_MODE_REG: u8 = 0x2A;         // Timer settings
pub const T_PRESCALER_REG: u8 = 0x2B;    // Timer prescaler value (low byte)
pub const T_RELOAD_REG_H: u8 = 0x2C;     // 16-bit timer reload value (high byte)
pub const T_RELOAD_REG_L: u8 = 0x2D;     // 16-bit timer reload value (low byte)

// Test
pub const VERSION_REG: u8 = 0x37;        // Shows the software version

// COM_IEN_REG
pub const IRQ_INV: u8 = 0x80;
pub const TRANSCEIVE_IRQ_EN: u8 = 0x77;

// COMM_IRQ_REG
pub const SET1: u8 = 0x80;
pub const RX_IRQ: u8 = 0x20;
pub const IDLE_IRQ: u8 = 0x10;
pub const TIMER_IRQ: u8 = 0x01;

// ERROR_REG: BufferOvfl | CollErr | ParityErr | ProtocolErr
pub const ERROR_MASK: u8 = 0x1B;

// FIFO_LEVEL_REG
pub const FLUSH_BUFFER: u8 = 0x80;

// CONTROL_REG
pub const RX_LAST_BITS: u8 = 0x07;

// BIT_FRAMING_REG
pub const START_SEND: u8 = 0x80;
pub const SHORT_FRAME: u8 = 0x07;        // Only 7 bits of the last byte are sent

// TX_CONTROL_REG: Tx2RFEn | Tx1RFEn
pub const TX_RF_EN: u8 = 0x03;

/// Address byte that opens a register write.
pub const fn write_address(reg: u8) -> u8 {
    (reg << 1) & 0x7E
}

/// Address byte that opens a register read.
pub const fn read_address(reg: u8) -> u8 {
    write_address(reg) | 0x80
}
