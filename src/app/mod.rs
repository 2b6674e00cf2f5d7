// Application layer: one service facade per API resource group.

pub mod services;
