//! 语法分析模块。
//!
//! 解析器采用递归下降，直接驱动词法扫描器的单词法单元前瞻游标，
//! 把一个源文件转换为抽象语法树。任何语法错误都会立即终止解析。

pub mod ast;
mod main;
#[cfg(test)]
mod test;

pub use main::parse;
