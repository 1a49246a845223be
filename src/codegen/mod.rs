//! C 代码生成模块。
//!
//! 生成器把检查过的模块降低为一对 C 翻译单元：头文件和实现文件。
//! 结构体不预先生成；每个具体的泛型实例化在第一次被用到时
//! 单态化为一个唯一命名的 C 结构体，定义写进头文件。

mod expression;
mod function;
mod statement;
mod types;

use crate::parser::ast::{Module, NamedType, StructDecl};
use std::collections::HashMap;

/// 一次具体的实例化：完整的命名类型和为它分配的 C 结构体名。
struct Instance {
    ty: NamedType,
    name: String,
}

/// C 代码生成器。两个输出在内存中累积，由调用者写盘。
pub struct Generator<'m> {
    header: String,
    body: String,
    /// 实现文件当前的缩进层级，使用硬制表符。
    indent: usize,
    structs: HashMap<String, &'m StructDecl>,
    /// 已单态化的实例表，按生成顺序排列。
    instances: Vec<Instance>,
    counter: usize,
}

/// 把检查过的模块降低为 (头文件, 实现文件)。
///
/// `out` 是输出文件的基础名，原样出现在实现文件的 include 行里。
pub fn generate(module: &Module, out: &str) -> (String, String) {
    let mut generator = Generator {
        header: String::from("#include <stdint.h>\n\n"),
        body: format!("#include \"{}.h\"\n\n", out),
        indent: 0,
        structs: HashMap::new(),
        instances: Vec::new(),
        counter: 0,
    };
    for decl in &module.structs {
        generator.structs.insert(decl.name.name.clone(), decl);
    }
    for decl in &module.fns {
        generator.gen_fn(decl);
    }
    (generator.header, generator.body)
}

impl Generator<'_> {
    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.body.push('\t');
        }
    }
}
