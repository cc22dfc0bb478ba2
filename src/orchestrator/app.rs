//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 持有文档存储，把每条命令委托给对应的业务能力或作答流程。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：打开数据目录，建立各项服务
//! 2. **名册与登录**：新增/删除学生，登录状态保存在文档存储中
//! 3. **作答**：终端输入经后台线程转成输入流，交给会话驱动器
//! 4. **查看**：回顾、成绩分组、已分享成绩

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::channel::mpsc;
use futures::Stream;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, SessionError};
use crate::infrastructure::{DocumentStore, FileKvStore};
use crate::models::attempt::AttemptRecord;
use crate::models::load_all_toml_drafts;
use crate::models::student::StudentIdentity;
use crate::orchestrator::command::{Command, USAGE};
use crate::orchestrator::session_runner::{run_session, SessionInput};
use crate::services::{review_renderer, AttemptRecorder, NewStudent, QuizCatalog, ResultsService, Roster};
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::logging::{format_timestamp, log_startup};
use crate::workflow::{QuizFlow, SessionView};

/// 应用主结构
pub struct App {
    config: Config,
    clock: Arc<dyn Clock>,
    catalog: QuizCatalog,
    roster: Roster,
    results: ResultsService,
    recorder: AttemptRecorder,
    flow: QuizFlow,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let kv = FileKvStore::open(&config.data_dir)
            .with_context(|| format!("无法打开数据目录: {}", config.data_dir))?;
        Ok(Self::with_store(config, DocumentStore::new(Arc::new(kv))))
    }

    /// 使用给定的文档存储建立应用
    pub fn with_store(config: Config, store: DocumentStore) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            config,
            catalog: QuizCatalog::new(store.clone()),
            roster: Roster::new(store.clone()),
            results: ResultsService::new(store.clone()),
            recorder: AttemptRecorder::new(store.clone()),
            flow: QuizFlow::with_clock(store, clock.clone()),
            clock,
        }
    }

    /// 执行一条命令
    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Help => println!("{}", USAGE),
            Command::Import { folder } => self.import(folder).await?,
            Command::AddStudent {
                student_id,
                email,
                password,
                name,
            } => {
                let account = self.roster.add(
                    NewStudent {
                        student_id,
                        email,
                        password,
                        name,
                    },
                    self.clock.now_millis(),
                )?;
                println!("已添加学生 {}", account.student_id);
            }
            Command::RemoveStudent { student_id } => {
                if self.roster.remove(&student_id)? {
                    println!("已删除学生 {}", student_id);
                } else {
                    println!("学生 {} 不存在", student_id);
                }
            }
            Command::ClearStudents => {
                self.roster.clear()?;
                println!("名册已清空");
            }
            Command::Students => self.print_students()?,
            Command::Login {
                student_id,
                password,
            } => {
                let identity = self.roster.login(&student_id, &password)?;
                println!("欢迎, {}", display_name(&identity));
            }
            Command::Logout => {
                self.roster.logout()?;
                println!("已退出登录");
            }
            Command::Take => self.take().await?,
            Command::Review => {
                let snapshot = self.recorder.last_snapshot()?;
                println!("{}", review_renderer::render(snapshot.as_ref()));
            }
            Command::FinishReview => {
                self.recorder.discard_snapshot()?;
                println!("回顾已结束");
            }
            Command::Results => self.print_results()?,
            Command::Share(key) => {
                let changed = self.results.mark_shared(&key)?;
                if changed == 0 {
                    println!("没有找到成绩 {}", key);
                } else {
                    println!("已分享 {} 条成绩", changed);
                }
            }
            Command::MyResults => {
                let student = self.require_student()?;
                let records = self.results.shared_for(&student.student_id)?;
                if records.is_empty() {
                    println!("暂无已分享的成绩");
                }
                for record in &records {
                    println!("{}", format_record(record));
                }
            }
        }
        Ok(())
    }

    async fn import(&self, folder: Option<String>) -> Result<()> {
        let folder = folder.unwrap_or_else(|| self.config.toml_folder.clone());
        info!("\n📁 正在扫描待导入的试卷: {}", folder);

        let drafts = load_all_toml_drafts(&folder).await?;
        if drafts.is_empty() {
            warn!("⚠️ 没有找到可导入的TOML文件");
            return Ok(());
        }

        let created = self.catalog.import_drafts(&drafts, self.clock.now_millis())?;
        for quiz in &created {
            println!("{}  {} ({} 题)", quiz.quiz_id, quiz.title, quiz.question_count());
        }
        info!("✓ 导入 {}/{} 份试卷", created.len(), drafts.len());
        Ok(())
    }

    async fn take(&self) -> Result<()> {
        let student = self.require_student()?;
        let mut rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let session = self.flow.start(student, &mut rng)?;
        println!("输入 1-4 选择选项，回车或 n 进入下一题");

        let outcome = run_session(&self.flow, session, stdin_inputs(), |view| match view {
            SessionView::Countdown { .. } => {
                print!("\r{}  ", view);
                let _ = std::io::stdout().flush();
            }
            _ => println!("\n{}", view),
        })
        .await?;

        println!(
            "\n已提交: {} / {}  (review 查看回顾)",
            outcome.score, outcome.total
        );
        Ok(())
    }

    fn require_student(&self) -> Result<StudentIdentity> {
        Ok(self
            .roster
            .logged_in()?
            .ok_or(AppError::Session(SessionError::NoStudentLoggedIn))?)
    }

    fn print_students(&self) -> Result<()> {
        let students = self.roster.list()?;
        if students.is_empty() {
            println!("名册为空");
        }
        for s in &students {
            println!("{}  {}  {}", s.student_id, s.email, s.name);
        }
        Ok(())
    }

    fn print_results(&self) -> Result<()> {
        let quizzes = self.catalog.list()?;
        let groups = self.results.grouped_by_quiz(&quizzes)?;
        if groups.is_empty() {
            println!("暂无成绩");
        }
        for group in &groups {
            println!("{} ({})", group.title, group.quiz_id);
            for record in &group.records {
                println!("  {}", format_record(record));
            }
        }
        Ok(())
    }
}

fn display_name(identity: &StudentIdentity) -> &str {
    if identity.name.is_empty() {
        &identity.student_id
    } else {
        &identity.name
    }
}

fn format_record(record: &AttemptRecord) -> String {
    format!(
        "{}  {}  {}/{}  {} [{}]{}",
        record.student_id,
        record.quiz_title,
        record.score,
        record.total,
        format_timestamp(record.submitted_at),
        record.submitted_at,
        if record.shared { "  已分享" } else { "" }
    )
}

/// 终端输入流
///
/// 标准输入在独立线程上阻塞读取，程序退出时不必等待它结束
fn stdin_inputs() -> impl Stream<Item = SessionInput> + Unpin {
    let (tx, rx) = mpsc::unbounded();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            match SessionInput::parse(&line) {
                Some(input) => {
                    if tx.unbounded_send(input).is_err() {
                        break;
                    }
                }
                None => warn!("⚠️ 无法识别的输入: {}", line.trim()),
            }
        }
    });
    rx
}
