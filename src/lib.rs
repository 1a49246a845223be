pub mod checker;
pub mod codegen;
pub mod lexer;
pub mod parser;
pub mod reporter;
pub mod utils;

use reporter::CompilerError;

/// 编译一份 Cata 源代码。
///
/// # Arguments
/// * `source` - 要编译的源代码。
/// * `out` - 输出文件的基础名，实现文件会 include `<out>.h`。
///
/// # Returns
/// * `Ok((header, body))` 包含生成的两个 C 翻译单元。
/// * `Err(CompilerError)` 是遇到的第一个诊断，编译到此为止。
pub fn compile(source: &str, out: &str) -> Result<(String, String), CompilerError> {
    // 1. 词法与语法分析
    let module = parser::parse(source)?;

    // 2. 语义检查。检查器只验证，不改写语法树。
    checker::check_module(&module)?;

    // 3. 生成 C 代码
    Ok(codegen::generate(&module, out))
}
