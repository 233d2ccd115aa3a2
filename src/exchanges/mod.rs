pub mod bgw;
