pub mod a001_tables;
