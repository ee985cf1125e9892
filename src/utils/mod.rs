// 工具函数模块
// 包含金额格式化、国旗、输入验证、二维码等通用工具

pub mod country;
pub mod currency;
pub mod qr;
pub mod validation;

// 重新导出常用函数
pub use country::*;
pub use currency::*;
pub use qr::*;
pub use validation::*;
