use anyhow::Result;
use quiz_grader::utils::logging;
use quiz_grader::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置，无法解析的环境变量回退到默认值
    let config = match Config::try_from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("⚠️ {}，无法解析的配置项使用默认值", e);
            Config::from_env()
        }
    };

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config).await?;
    app.run().await?;

    Ok(())
}
