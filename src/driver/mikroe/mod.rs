pub mod thermo26;
