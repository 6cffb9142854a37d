//! Fixed labels of the output document.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

pub struct Labels {
    /// Parameter table header
    pub header: [&'static str; 5],
    pub yes: &'static str,
    pub no: &'static str,
    /// Numbered headings of a method section, in order
    pub sections: [&'static str; 7],
    pub path: &'static str,
    pub method: &'static str,
    pub content_type: &'static str,
    pub envelope: &'static str,
    pub code: &'static str,
    pub message: &'static str,
    pub unavailable: &'static str,
}

static EN: Labels = Labels {
    header: ["Parameter", "Type", "Length", "Required", "Description"],
    yes: "Yes",
    no: "No",
    sections: [
        "1. Description",
        "2. Access",
        "3. Request parameters",
        "4. Response parameters",
        "5. Sample code",
        "6. Request payload",
        "7. Response payload",
    ],
    path: "Path",
    method: "Method",
    content_type: "Content-type",
    envelope: "data",
    code: "0: success, others see error-code reference",
    message: "response description",
    unavailable: "Parameter table unavailable",
};

static ZH: Labels = Labels {
    header: ["参数", "类型", "长度", "是否必须", "描述"],
    yes: "是",
    no: "否",
    sections: [
        "1. 接口说明",
        "2. 访问说明",
        "3. 请求参数",
        "4. 响应参数",
        "5. 示例代码",
        "6. 请求报文",
        "7. 响应报文",
    ],
    path: "Path",
    method: "Method",
    content_type: "Content-type",
    envelope: "数据",
    code: "0: 成功, 其余详见错误码说明",
    message: "应答描述",
    unavailable: "参数表生成失败",
};

impl Locale {
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN,
            Locale::Zh => &ZH,
        }
    }

    pub fn yes_no(self, value: bool) -> &'static str {
        let labels = self.labels();
        if value {
            labels.yes
        } else {
            labels.no
        }
    }
}
