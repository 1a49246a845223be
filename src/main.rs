use cata::reporter;
use clap::Parser;
use std::fs;
use std::path::Path;
use std::process::{self, Command};

/// Cata 语言编译器：把单个源文件编译为一对 C 翻译单元，
/// 再交给系统的 C 编译器和运行时库链接成可执行文件
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 需要编译的源文件路径
    input_file: String,

    /// 输出文件的基础名。
    /// 如果不提供，将根据输入文件名自动生成 (例如: hello.cata -> hello)
    #[arg(short, long)]
    output: Option<String>,

    /// 只生成 C 代码，而不调用 C 编译器
    #[arg(long, short = 'S')]
    emit_c: bool,

    /// 运行时库的路径
    #[arg(long, default_value = "catalib.c")]
    runtime: String,

    /// 编译成功后立即运行生成的可执行文件
    #[arg(long)]
    run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let input_path = Path::new(&cli.input_file);

    // 动态决定输出文件的基础名
    let base = match cli.output {
        Some(ref output) => output.clone(),
        None => input_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(|stem| stem.to_string())
            .unwrap_or_else(|| "out".to_string()),
    };

    let source = fs::read_to_string(input_path)
        .map_err(|e| format!("Failed to read file '{}': {}", cli.input_file, e))?;

    // 编译管道：第一个诊断在这里终止进程
    let (header, body) = match cata::compile(&source, &base) {
        Ok(output) => output,
        Err(error) => {
            reporter::report(&cli.input_file, &error);
            process::exit(1);
        }
    };

    fs::write(format!("{}.h", base), header)?;
    fs::write(format!("{}.c", base), body)?;

    if cli.emit_c {
        println!("Successfully generated C code at '{}.c'", base);
        return Ok(());
    }

    // 调用系统 C 编译器，把生成的代码和运行时库链接成可执行文件
    let status = Command::new("cc")
        .arg(format!("{}.c", base))
        .arg(&cli.runtime)
        .arg("-o")
        .arg(&base)
        .status()?;
    if !status.success() {
        return Err(format!("C compiler failed with status: {}", status).into());
    }
    println!("Successfully compiled executable at '{}'", base);

    if cli.run {
        let status = Command::new(format!("./{}", base)).status()?;
        process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}
