// Domain layer: 模型與 ports，不依賴 HTTP 或檔案系統實作

pub mod model;
pub mod ports;
