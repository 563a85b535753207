use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rdispatch
/// Dispatch terminal for morning/afternoon driver queues on SQLite
#[derive(Parser)]
#[command(
    name = "rdispatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Terminal de despacho: filas de motoristas por turno, histórico de saídas e relatórios de produtividade em SQLite",
    long_about = None
)]
pub struct Cli {
    /// Caminho alternativo do banco de dados
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Modo de teste (não grava o arquivo de configuração)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Date window shared by history, reports and exports.
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    #[arg(long, value_name = "YYYY-MM-DD", help = "Primeiro dia (inclusive)")]
    pub from: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Último dia (inclusive), padrão hoje")]
    pub to: Option<String>,

    #[arg(
        long,
        value_name = "RANGE",
        help = "Ano, mês, dia ou intervalo A:B; substitui --from/--to"
    )]
    pub range: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inicializa o banco de dados e a configuração
    Init,

    /// Arquivo de configuração (ver, verificar ou editar)
    Config {
        #[arg(long = "print", help = "Mostra a configuração atual")]
        print_config: bool,

        #[arg(long = "check", help = "Verifica e completa as chaves ausentes")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edita a configuração (editor padrão: $EDITOR, ou nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor a usar (vim, nano ou caminho)")]
        editor: Option<String>,
    },

    /// Inicia uma sessão: PIN do inquilino ou administrador
    Login {
        #[arg(long, conflicts_with = "admin", help = "PIN de operador de um inquilino")]
        pin: Option<String>,

        #[arg(long, help = "Sessão de administrador com acesso a todos os inquilinos")]
        admin: bool,

        #[arg(long, default_value = "admin", requires = "admin", help = "Nome do administrador")]
        user: String,
    },

    /// Encerra a sessão atual
    Logout,

    /// Mostra a sessão atual
    Whoami,

    /// Inquilinos e seus PINs de operador (somente administradores)
    Tenant {
        #[command(subcommand)]
        action: TenantCmd,
    },

    /// Motoristas cadastrados
    Driver {
        #[command(subcommand)]
        action: DriverCmd,
    },

    /// Filas por turno
    Queue {
        #[command(subcommand)]
        action: QueueCmd,
    },

    /// Registra a saída de um motorista da fila
    Exit {
        #[arg(long, short, help = "Turno: manha (m) ou tarde (t)")]
        period: String,

        #[arg(long, short, help = "Zona de entrega")]
        zone: String,

        #[arg(long, help = "Número do DT")]
        dt: String,

        #[arg(long, default_value_t = 1, help = "Volumes levados")]
        orders: i64,

        #[arg(long, default_value_t = 1, help = "Posição na fila (1 = primeiro)")]
        pos: usize,
    },

    /// Mostra o painel de despacho
    Board,

    /// Mantém o painel na tela, atualizando a cada alteração
    Watch {
        #[arg(long, value_name = "MS", help = "Intervalo de consulta, padrão da configuração")]
        interval: Option<u64>,

        /// Stop after N polls
        #[arg(long, hide = true)]
        ticks: Option<u64>,
    },

    /// Histórico de saídas
    History {
        #[command(subcommand)]
        action: Option<HistoryCmd>,

        #[command(flatten)]
        window: WindowArgs,

        #[arg(long, help = "Filtro por nome, DT ou zona")]
        filter: Option<String>,
    },

    /// Relatórios diário, de produtividade e de frequência
    Report {
        #[command(subcommand)]
        action: ReportCmd,
    },

    /// Exporta o histórico de saídas
    Export {
        #[arg(long, value_enum, help = "Formato de saída, padrão pela extensão do arquivo")]
        format: Option<ExportFormat>,

        #[arg(
            long,
            value_name = "FILE",
            help = "Arquivo ou diretório de saída absoluto, padrão o diretório atual"
        )]
        file: Option<String>,

        #[command(flatten)]
        window: WindowArgs,

        #[arg(long, help = "Filtro por nome, DT ou zona")]
        filter: Option<String>,

        #[arg(long, value_name = "REF", help = "Exporta a produtividade de um motorista")]
        driver: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Apaga filas, saídas e motoristas visíveis na sessão
    Purge,

    /// Log interno
    Log {
        #[arg(long = "print", help = "Mostra as linhas do log interno")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum TenantCmd {
    /// Cria um inquilino acessível por PIN
    Add {
        #[arg(long)]
        label: String,

        #[arg(long)]
        pin: String,
    },

    /// Lista os inquilinos
    List,
}

#[derive(Subcommand)]
pub enum DriverCmd {
    /// Cadastra um motorista
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        fleet: String,

        #[arg(long, default_value = "")]
        registration: String,

        #[arg(long, default_value = "")]
        company: String,
    },

    /// Altera dados do motorista
    Edit {
        /// Id, prefixo do id ou número da frota
        reference: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        fleet: Option<String>,

        #[arg(long)]
        registration: Option<String>,

        #[arg(long)]
        company: Option<String>,
    },

    /// Exclui um motorista com suas filas e histórico
    Del {
        reference: String,

        #[arg(long, short = 'y', help = "Não pede confirmação")]
        yes: bool,
    },

    /// Lista os motoristas
    List {
        #[arg(long, help = "Busca por nome")]
        search: Option<String>,
    },

    /// Apaga o histórico de saídas de um motorista
    ClearLogs {
        reference: String,

        #[arg(long, short = 'y', help = "Não pede confirmação")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum QueueCmd {
    /// Coloca um motorista no fim da fila
    Add {
        /// Id, prefixo do id ou número da frota
        reference: String,

        #[arg(long, short)]
        period: String,
    },

    /// Remove a entrada de uma posição
    Remove {
        #[arg(long, short)]
        period: String,

        #[arg(long)]
        pos: usize,
    },

    /// Move uma entrada de uma posição para outra
    Move {
        #[arg(long, short)]
        period: String,

        #[arg(long)]
        from: usize,

        #[arg(long)]
        to: usize,
    },

    /// Move uma entrada para o início da fila
    Top {
        #[arg(long, short)]
        period: String,

        #[arg(long)]
        pos: usize,
    },

    /// Sobe uma entrada uma posição
    Up {
        #[arg(long, short)]
        period: String,

        #[arg(long)]
        pos: usize,
    },

    /// Mostra uma ou as duas filas
    Show {
        #[arg(long, short)]
        period: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum HistoryCmd {
    /// Corrige o volume de uma saída (nunca abaixo de zero)
    Adjust {
        /// Id ou prefixo do id da saída
        log_id: String,

        #[arg(long, allow_negative_numbers = true)]
        delta: i64,
    },

    /// Exclui uma saída
    Del {
        log_id: String,

        #[arg(long, short = 'y', help = "Não pede confirmação")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ReportCmd {
    /// Saídas de hoje por turno
    Daily,

    /// Saídas, volume, média e zonas de um motorista
    Productivity {
        /// Id, prefixo do id ou número da frota
        reference: String,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Quem das empresas acompanhadas entrou na fila ou saiu hoje
    Frequency,
}
