//! Mapping of AccessKit roles to MSAA and IAccessible2 role codes.

use accesskit::Role;

/// MSAA `ROLE_SYSTEM_*` codes.
pub mod msaa {
    /// `ROLE_SYSTEM_MENUBAR`.
    pub const MENUBAR: i32 = 0x02;
    /// `ROLE_SYSTEM_SCROLLBAR`.
    pub const SCROLLBAR: i32 = 0x03;
    /// `ROLE_SYSTEM_ALERT`.
    pub const ALERT: i32 = 0x08;
    /// `ROLE_SYSTEM_WINDOW`.
    pub const WINDOW: i32 = 0x09;
    /// `ROLE_SYSTEM_CLIENT`.
    pub const CLIENT: i32 = 0x0A;
    /// `ROLE_SYSTEM_MENUPOPUP`.
    pub const MENUPOPUP: i32 = 0x0B;
    /// `ROLE_SYSTEM_MENUITEM`.
    pub const MENUITEM: i32 = 0x0C;
    /// `ROLE_SYSTEM_TOOLTIP`.
    pub const TOOLTIP: i32 = 0x0D;
    /// `ROLE_SYSTEM_PANE`.
    pub const PANE: i32 = 0x10;
    /// `ROLE_SYSTEM_DIALOG`.
    pub const DIALOG: i32 = 0x12;
    /// `ROLE_SYSTEM_GROUPING`.
    pub const GROUPING: i32 = 0x14;
    /// `ROLE_SYSTEM_SEPARATOR`.
    pub const SEPARATOR: i32 = 0x15;
    /// `ROLE_SYSTEM_TOOLBAR`.
    pub const TOOLBAR: i32 = 0x16;
    /// `ROLE_SYSTEM_STATUSBAR`.
    pub const STATUSBAR: i32 = 0x17;
    /// `ROLE_SYSTEM_TABLE`.
    pub const TABLE: i32 = 0x18;
    /// `ROLE_SYSTEM_COLUMNHEADER`.
    pub const COLUMNHEADER: i32 = 0x19;
    /// `ROLE_SYSTEM_ROWHEADER`.
    pub const ROWHEADER: i32 = 0x1A;
    /// `ROLE_SYSTEM_ROW`.
    pub const ROW: i32 = 0x1C;
    /// `ROLE_SYSTEM_CELL`.
    pub const CELL: i32 = 0x1D;
    /// `ROLE_SYSTEM_LINK`.
    pub const LINK: i32 = 0x1E;
    /// `ROLE_SYSTEM_LIST`.
    pub const LIST: i32 = 0x21;
    /// `ROLE_SYSTEM_LISTITEM`.
    pub const LISTITEM: i32 = 0x22;
    /// `ROLE_SYSTEM_OUTLINE`.
    pub const OUTLINE: i32 = 0x23;
    /// `ROLE_SYSTEM_OUTLINEITEM`.
    pub const OUTLINEITEM: i32 = 0x24;
    /// `ROLE_SYSTEM_PAGETAB`.
    pub const PAGETAB: i32 = 0x25;
    /// `ROLE_SYSTEM_PROPERTYPAGE`.
    pub const PROPERTYPAGE: i32 = 0x26;
    /// `ROLE_SYSTEM_GRAPHIC`.
    pub const GRAPHIC: i32 = 0x28;
    /// `ROLE_SYSTEM_STATICTEXT`.
    pub const STATICTEXT: i32 = 0x29;
    /// `ROLE_SYSTEM_TEXT`.
    pub const TEXT: i32 = 0x2A;
    /// `ROLE_SYSTEM_PUSHBUTTON`.
    pub const PUSHBUTTON: i32 = 0x2B;
    /// `ROLE_SYSTEM_CHECKBUTTON`.
    pub const CHECKBUTTON: i32 = 0x2C;
    /// `ROLE_SYSTEM_RADIOBUTTON`.
    pub const RADIOBUTTON: i32 = 0x2D;
    /// `ROLE_SYSTEM_COMBOBOX`.
    pub const COMBOBOX: i32 = 0x2E;
    /// `ROLE_SYSTEM_PROGRESSBAR`.
    pub const PROGRESSBAR: i32 = 0x30;
    /// `ROLE_SYSTEM_SLIDER`.
    pub const SLIDER: i32 = 0x33;
    /// `ROLE_SYSTEM_SPINBUTTON`.
    pub const SPINBUTTON: i32 = 0x34;
    /// `ROLE_SYSTEM_PAGETABLIST`.
    pub const PAGETABLIST: i32 = 0x3C;
}

/// IAccessible2 `IA2_ROLE_*` codes for roles MSAA lacks.
pub mod ia2 {
    /// `IA2_ROLE_COLOR_CHOOSER`.
    pub const COLOR_CHOOSER: i32 = 0x404;
    /// `IA2_ROLE_CHECK_MENU_ITEM`.
    pub const CHECK_MENU_ITEM: i32 = 0x403;
    /// `IA2_ROLE_RADIO_MENU_ITEM`.
    pub const RADIO_MENU_ITEM: i32 = 0x41F;
    /// `IA2_ROLE_SCROLL_PANE`.
    pub const SCROLL_PANE: i32 = 0x423;
}

/// The protocol role code reported for `role`.
///
/// Roles without a closer match are reported as `ROLE_SYSTEM_CLIENT`.
pub fn role_code(role: Role) -> i32 {
    match role {
        Role::Window => msaa::WINDOW,
        Role::Dialog => msaa::DIALOG,
        Role::Alert => msaa::ALERT,
        Role::Button => msaa::PUSHBUTTON,
        Role::CheckBox => msaa::CHECKBUTTON,
        Role::RadioButton => msaa::RADIOBUTTON,
        Role::TextInput | Role::MultilineTextInput => msaa::TEXT,
        Role::Label => msaa::STATICTEXT,
        Role::Link => msaa::LINK,
        Role::Image => msaa::GRAPHIC,
        Role::ProgressIndicator => msaa::PROGRESSBAR,
        Role::Slider => msaa::SLIDER,
        Role::SpinButton => msaa::SPINBUTTON,
        Role::ComboBox => msaa::COMBOBOX,
        Role::List => msaa::LIST,
        Role::ListItem => msaa::LISTITEM,
        Role::Tree => msaa::OUTLINE,
        Role::TreeItem => msaa::OUTLINEITEM,
        Role::Table | Role::Grid => msaa::TABLE,
        Role::Row => msaa::ROW,
        Role::Cell => msaa::CELL,
        Role::ColumnHeader => msaa::COLUMNHEADER,
        Role::RowHeader => msaa::ROWHEADER,
        Role::MenuBar => msaa::MENUBAR,
        Role::Menu => msaa::MENUPOPUP,
        Role::MenuItem => msaa::MENUITEM,
        Role::MenuItemCheckBox => ia2::CHECK_MENU_ITEM,
        Role::MenuItemRadio => ia2::RADIO_MENU_ITEM,
        Role::Toolbar => msaa::TOOLBAR,
        Role::Status => msaa::STATUSBAR,
        Role::TabList => msaa::PAGETABLIST,
        Role::Tab => msaa::PAGETAB,
        Role::TabPanel => msaa::PROPERTYPAGE,
        Role::ScrollBar => msaa::SCROLLBAR,
        Role::ScrollView => ia2::SCROLL_PANE,
        Role::Splitter => msaa::SEPARATOR,
        Role::Group => msaa::GROUPING,
        Role::Tooltip => msaa::TOOLTIP,
        Role::ColorWell => ia2::COLOR_CHOOSER,
        Role::Pane => msaa::PANE,
        _ => msaa::CLIENT,
    }
}
